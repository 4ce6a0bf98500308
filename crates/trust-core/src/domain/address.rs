//! # Account Identifiers
//!
//! Three disjoint ways of naming an account on the network:
//!
//! - [`Address`]: numeric `shard.realm.num`
//! - [`Alias`]: `shard.realm` plus a single public key
//! - [`Moniker`]: `shard.realm` plus a 20-byte EVM address
//!
//! [`AccountId`] wraps any of them. Values of different kinds never compare
//! equal, even when they resolve to the same account on the ledger.

use crate::domain::endorsement::{Endorsement, EndorsementKind};
use crate::domain::errors::TrustError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use trust_crypto::{parse_public_key, KeyType, PublicKey};

const NONE_TEXT: &str = "None";

// =============================================================================
// Address
// =============================================================================

/// Numeric `shard.realm.num` account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    shard: u64,
    realm: u64,
    num: u64,
    sentinel: bool,
}

impl Address {
    /// The "no address" sentinel. Equal only to itself.
    pub const NONE: Address = Address {
        shard: 0,
        realm: 0,
        num: 0,
        sentinel: true,
    };

    /// Create an address from unsigned components.
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self {
            shard,
            realm,
            num,
            sentinel: false,
        }
    }

    /// Create an address from signed components, rejecting negatives.
    pub fn try_new(shard: i64, realm: i64, num: i64) -> Result<Self, TrustError> {
        Ok(Self::new(
            non_negative(shard, "shard", "Shard Number")?,
            non_negative(realm, "realm", "Realm Number")?,
            non_negative(num, "num", "Account Number")?,
        ))
    }

    /// Network shard.
    pub fn shard(&self) -> u64 {
        self.shard
    }

    /// Network realm.
    pub fn realm(&self) -> u64 {
        self.realm
    }

    /// Account number within the realm.
    pub fn num(&self) -> u64 {
        self.num
    }

    /// Whether this is [`Address::NONE`].
    pub fn is_none(&self) -> bool {
        self.sentinel
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sentinel {
            return f.write_str(NONE_TEXT);
        }
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NONE_TEXT {
            return Ok(Address::NONE);
        }
        let malformed =
            || TrustError::invalid_argument("value", "Address must be in the form shard.realm.num.");
        let mut parts = s.split('.');
        let (Some(shard), Some(realm), Some(num), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let parse = |part: &str| part.parse::<i64>().map_err(|_| malformed());
        Address::try_new(parse(shard)?, parse(realm)?, parse(num)?)
    }
}

// =============================================================================
// Alias
// =============================================================================

/// Account named by `shard.realm` and a single public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alias {
    shard: u64,
    realm: u64,
    key: Option<PublicKey>,
}

impl Alias {
    /// The "no alias" sentinel. Equal only to itself.
    pub const NONE: Alias = Alias {
        shard: 0,
        realm: 0,
        key: None,
    };

    /// Create an alias from key bytes in any supported public key format.
    pub fn new(shard: u64, realm: u64, public_key: &[u8]) -> Result<Self, TrustError> {
        let key = parse_public_key(public_key)
            .map_err(|e| TrustError::invalid_key("public_key", e))?;
        Ok(Self::from_public_key(shard, realm, key))
    }

    /// Create an alias from an already validated key.
    pub fn from_public_key(shard: u64, realm: u64, key: PublicKey) -> Self {
        Self {
            shard,
            realm,
            key: Some(key),
        }
    }

    /// Create an alias from a single-key endorsement.
    pub fn from_endorsement(
        shard: u64,
        realm: u64,
        endorsement: &Endorsement,
    ) -> Result<Self, TrustError> {
        match endorsement.public_key() {
            Some(key) => Ok(Self::from_public_key(shard, realm, *key)),
            None => Err(TrustError::invalid_argument(
                "endorsement",
                "An alias can only be formed from a single Ed25519 or ECDSA Secp256K1 key.",
            )),
        }
    }

    /// Network shard.
    pub fn shard(&self) -> u64 {
        self.shard
    }

    /// Network realm.
    pub fn realm(&self) -> u64 {
        self.realm
    }

    /// Aliasing key, absent only for [`Alias::NONE`].
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.key.as_ref()
    }

    /// The aliasing key as an endorsement; [`Endorsement::NONE`] for the sentinel.
    pub fn endorsement(&self) -> Endorsement {
        match self.key {
            Some(key) => Endorsement::from_public_key(key),
            None => Endorsement::NONE,
        }
    }

    /// Whether this is [`Alias::NONE`].
    pub fn is_none(&self) -> bool {
        self.key.is_none()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(
                f,
                "{}.{}.{}",
                self.shard,
                self.realm,
                hex::encode(key.as_raw_bytes())
            ),
            None => f.write_str(NONE_TEXT),
        }
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "Alias({self}, {})", key.key_type()),
            None => f.write_str("Alias(None)"),
        }
    }
}

// =============================================================================
// Moniker
// =============================================================================

/// Account named by `shard.realm` and a 20-byte EVM address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Moniker {
    shard: u64,
    realm: u64,
    bytes: [u8; 20],
    sentinel: bool,
}

impl Moniker {
    /// The "no moniker" sentinel. Equal only to itself.
    pub const NONE: Moniker = Moniker {
        shard: 0,
        realm: 0,
        bytes: [0u8; 20],
        sentinel: true,
    };

    /// Create a moniker from exactly 20 bytes.
    pub fn new(shard: u64, realm: u64, evm_address: &[u8]) -> Result<Self, TrustError> {
        let bytes: [u8; 20] = evm_address.try_into().map_err(|_| {
            TrustError::invalid_argument(
                "evm_address",
                "The EVM address must be exactly 20 bytes long.",
            )
        })?;
        Ok(Self {
            shard,
            realm,
            bytes,
            sentinel: false,
        })
    }

    /// Derive the moniker of an ECDSA secp256k1 endorsement.
    pub fn from_endorsement(
        shard: u64,
        realm: u64,
        endorsement: &Endorsement,
    ) -> Result<Self, TrustError> {
        let address = match endorsement.kind() {
            EndorsementKind::Key(key) if key.key_type() == KeyType::EcdsaSecp256k1 => {
                key.evm_address()
            }
            _ => None,
        };
        match address {
            Some(bytes) => Self::new(shard, realm, &bytes),
            None => Err(TrustError::invalid_argument(
                "endorsement",
                "Only ECDSA Secp256K1 endorsements can be converted to an EVM address.",
            )),
        }
    }

    /// Network shard.
    pub fn shard(&self) -> u64 {
        self.shard
    }

    /// Network realm.
    pub fn realm(&self) -> u64 {
        self.realm
    }

    /// The 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// `0x`-prefixed lowercase hex, without shard and realm.
    pub fn to_evm_string(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Whether this is [`Moniker::NONE`].
    pub fn is_none(&self) -> bool {
        self.sentinel
    }
}

impl fmt::Display for Moniker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sentinel {
            return f.write_str(NONE_TEXT);
        }
        write!(f, "{}.{}.{}", self.shard, self.realm, hex::encode(self.bytes))
    }
}

impl fmt::Debug for Moniker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moniker({self})")
    }
}

impl FromStr for Moniker {
    type Err = TrustError;

    /// Accepts `0x<40 hex>` (shard and realm zero) or `shard.realm.<40 hex>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NONE_TEXT {
            return Ok(Moniker::NONE);
        }
        let malformed = || {
            TrustError::invalid_argument(
                "value",
                "Moniker must be 0x-prefixed hex or shard.realm.hex with 20 address bytes.",
            )
        };
        let decode = |text: &str| hex::decode(text).map_err(|_| malformed());

        if let Some(body) = s.strip_prefix("0x") {
            return Moniker::new(0, 0, &decode(body)?);
        }
        let mut parts = s.split('.');
        let (Some(shard), Some(realm), Some(body), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let shard = non_negative(shard.parse().map_err(|_| malformed())?, "shard", "Shard Number")?;
        let realm = non_negative(realm.parse().map_err(|_| malformed())?, "realm", "Realm Number")?;
        Moniker::new(shard, realm, &decode(body)?)
    }
}

// =============================================================================
// AccountId
// =============================================================================

/// Any one of the three account identifier forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountId {
    /// Numeric address
    Address(Address),
    /// Key alias
    Alias(Alias),
    /// EVM address
    Moniker(Moniker),
}

impl AccountId {
    /// The numeric address, if that is the active form.
    pub fn try_as_address(&self) -> Option<&Address> {
        match self {
            AccountId::Address(address) => Some(address),
            _ => None,
        }
    }

    /// The key alias, if that is the active form.
    pub fn try_as_alias(&self) -> Option<&Alias> {
        match self {
            AccountId::Alias(alias) => Some(alias),
            _ => None,
        }
    }

    /// The EVM moniker, if that is the active form.
    pub fn try_as_moniker(&self) -> Option<&Moniker> {
        match self {
            AccountId::Moniker(moniker) => Some(moniker),
            _ => None,
        }
    }

    /// Network shard of whichever form is active.
    pub fn shard(&self) -> u64 {
        match self {
            AccountId::Address(a) => a.shard(),
            AccountId::Alias(a) => a.shard(),
            AccountId::Moniker(m) => m.shard(),
        }
    }

    /// Network realm of whichever form is active.
    pub fn realm(&self) -> u64 {
        match self {
            AccountId::Address(a) => a.realm(),
            AccountId::Alias(a) => a.realm(),
            AccountId::Moniker(m) => m.realm(),
        }
    }

    /// Whether the active form is its `NONE` sentinel.
    pub fn is_none(&self) -> bool {
        match self {
            AccountId::Address(a) => a.is_none(),
            AccountId::Alias(a) => a.is_none(),
            AccountId::Moniker(m) => m.is_none(),
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Address(a) => a.fmt(f),
            AccountId::Alias(a) => a.fmt(f),
            AccountId::Moniker(m) => m.fmt(f),
        }
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        AccountId::Address(address)
    }
}

impl From<Alias> for AccountId {
    fn from(alias: Alias) -> Self {
        AccountId::Alias(alias)
    }
}

impl From<Moniker> for AccountId {
    fn from(moniker: Moniker) -> Self {
        AccountId::Moniker(moniker)
    }
}

// =============================================================================
// Serde (string form)
// =============================================================================

macro_rules! serde_via_str {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_via_str!(Address);
serde_via_str!(Moniker);

fn non_negative(value: i64, parameter: &'static str, label: &str) -> Result<u64, TrustError> {
    u64::try_from(value)
        .map_err(|_| TrustError::invalid_argument(parameter, format!("{label} cannot be negative.")))
}
