//! # Wire Messages
//!
//! Protobuf shapes of keys, account ids and signature maps as the network
//! encodes them, plus the mappings to and from the domain types. Field
//! numbers follow the ledger's `basic_types.proto`.

use crate::domain::address::{AccountId, Address, Alias, Moniker};
use crate::domain::endorsement::{Endorsement, EndorsementKind};
use crate::domain::errors::TrustError;
use crate::domain::signature_map::{SignatureMap, SignaturePair};
use prost::Message;
use trust_crypto::{parse_public_key_as, KeyType, PublicKey};

/// Polymorphic key.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Key {
    #[prost(oneof = "key::Key", tags = "1, 2, 5, 6, 7")]
    pub key: Option<key::Key>,
}

/// Nested types for [`Key`].
pub mod key {
    /// Active key variant.
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Key {
        #[prost(message, tag = "1")]
        ContractId(super::ContractId),
        #[prost(bytes, tag = "2")]
        Ed25519(Vec<u8>),
        #[prost(message, tag = "5")]
        ThresholdKey(super::ThresholdKey),
        #[prost(message, tag = "6")]
        KeyList(super::KeyList),
        #[prost(bytes, tag = "7")]
        EcdsaSecp256k1(Vec<u8>),
    }
}

/// All listed keys must sign.
#[derive(Clone, PartialEq, prost::Message)]
pub struct KeyList {
    #[prost(message, repeated, tag = "1")]
    pub keys: Vec<Key>,
}

/// At least `threshold` of the listed keys must sign.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ThresholdKey {
    #[prost(uint32, tag = "1")]
    pub threshold: u32,
    #[prost(message, optional, tag = "2")]
    pub keys: Option<KeyList>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ContractId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "contract_id::Contract", tags = "3, 4")]
    pub contract: Option<contract_id::Contract>,
}

/// Nested types for [`ContractId`].
pub mod contract_id {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Contract {
        #[prost(int64, tag = "3")]
        ContractNum(i64),
        #[prost(bytes, tag = "4")]
        EvmAddress(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AccountIdMessage {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "account_id::Account", tags = "3, 4")]
    pub account: Option<account_id::Account>,
}

/// Nested types for [`AccountIdMessage`].
pub mod account_id {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Account {
        #[prost(int64, tag = "3")]
        AccountNum(i64),
        /// Serialized [`super::Key`] for key aliases, 20 bytes for EVM addresses
        #[prost(bytes, tag = "4")]
        Alias(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SignaturePairMessage {
    #[prost(bytes, tag = "1")]
    pub pub_key_prefix: Vec<u8>,
    #[prost(oneof = "signature_pair::Signature", tags = "2, 3, 4, 5, 6")]
    pub signature: Option<signature_pair::Signature>,
}

/// Nested types for [`SignaturePairMessage`].
pub mod signature_pair {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Signature {
        #[prost(bytes, tag = "2")]
        Contract(Vec<u8>),
        #[prost(bytes, tag = "3")]
        Ed25519(Vec<u8>),
        #[prost(bytes, tag = "4")]
        Rsa3072(Vec<u8>),
        #[prost(bytes, tag = "5")]
        Ecdsa384(Vec<u8>),
        #[prost(bytes, tag = "6")]
        EcdsaSecp256k1(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SignatureMapMessage {
    #[prost(message, repeated, tag = "1")]
    pub sig_pair: Vec<SignaturePairMessage>,
}

// =============================================================================
// Endorsement <-> Key
// =============================================================================

impl From<&Endorsement> for Key {
    fn from(endorsement: &Endorsement) -> Self {
        let key = match endorsement.kind() {
            EndorsementKind::Empty => key::Key::KeyList(KeyList { keys: Vec::new() }),
            EndorsementKind::Key(PublicKey::Ed25519(k)) => key::Key::Ed25519(k.as_bytes().to_vec()),
            EndorsementKind::Key(PublicKey::EcdsaSecp256k1(k)) => {
                key::Key::EcdsaSecp256k1(k.as_bytes().to_vec())
            }
            EndorsementKind::Contract(id) => key::Key::ContractId(contract_id_message(id)),
            EndorsementKind::List {
                required_count,
                children,
            } => {
                let keys = KeyList {
                    keys: children.iter().map(Key::from).collect(),
                };
                if *required_count as usize == children.len() {
                    key::Key::KeyList(keys)
                } else {
                    key::Key::ThresholdKey(ThresholdKey {
                        threshold: *required_count,
                        keys: Some(keys),
                    })
                }
            }
        };
        Key { key: Some(key) }
    }
}

impl TryFrom<Key> for Endorsement {
    type Error = TrustError;

    fn try_from(message: Key) -> Result<Self, Self::Error> {
        match message.key {
            Some(key::Key::Ed25519(bytes)) => key_endorsement(KeyType::Ed25519, &bytes),
            Some(key::Key::EcdsaSecp256k1(bytes)) => {
                key_endorsement(KeyType::EcdsaSecp256k1, &bytes)
            }
            Some(key::Key::ContractId(id)) => Endorsement::contract(contract_id_from_message(id)?),
            Some(key::Key::KeyList(list)) if list.keys.is_empty() => Ok(Endorsement::NONE),
            Some(key::Key::KeyList(list)) => Endorsement::list(decode_children(list)?),
            Some(key::Key::ThresholdKey(threshold)) => {
                let children = decode_children(threshold.keys.unwrap_or_default())?;
                Endorsement::threshold(threshold.threshold, children)
            }
            None => Err(TrustError::Wire("key message has no key set".into())),
        }
    }
}

fn key_endorsement(key_type: KeyType, bytes: &[u8]) -> Result<Endorsement, TrustError> {
    parse_public_key_as(key_type, bytes)
        .map(Endorsement::from_public_key)
        .map_err(|e| TrustError::Wire(e.to_string()))
}

fn decode_children(list: KeyList) -> Result<Vec<Endorsement>, TrustError> {
    list.keys.into_iter().map(Endorsement::try_from).collect()
}

/// Decode a serialized [`Key`] into an endorsement.
pub fn decode_endorsement(bytes: &[u8]) -> Result<Endorsement, TrustError> {
    Endorsement::try_from(Key::decode(bytes)?)
}

/// Serialize an endorsement as a [`Key`].
pub fn encode_endorsement(endorsement: &Endorsement) -> Vec<u8> {
    Key::from(endorsement).encode_to_vec()
}

// =============================================================================
// AccountId <-> wire
// =============================================================================

// Network ids never exceed i64::MAX; the saturation only guards the type gap.
fn wire_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn contract_id_message(id: &AccountId) -> ContractId {
    let contract = match id {
        AccountId::Address(address) => Some(contract_id::Contract::ContractNum(wire_int(address.num()))),
        AccountId::Moniker(moniker) => {
            Some(contract_id::Contract::EvmAddress(moniker.as_bytes().to_vec()))
        }
        // Rejected at construction.
        AccountId::Alias(_) => None,
    };
    ContractId {
        shard_num: wire_int(id.shard()),
        realm_num: wire_int(id.realm()),
        contract,
    }
}

fn contract_id_from_message(message: ContractId) -> Result<AccountId, TrustError> {
    let shard = wire_u64(message.shard_num, "Shard Number")?;
    let realm = wire_u64(message.realm_num, "Realm Number")?;
    match message.contract {
        Some(contract_id::Contract::ContractNum(num)) => {
            Ok(Address::new(shard, realm, wire_u64(num, "Contract Number")?).into())
        }
        Some(contract_id::Contract::EvmAddress(bytes)) => {
            Ok(Moniker::new(shard, realm, &bytes)?.into())
        }
        None => Err(TrustError::Wire("contract id has no contract set".into())),
    }
}

fn wire_u64(value: i64, label: &str) -> Result<u64, TrustError> {
    u64::try_from(value).map_err(|_| TrustError::Wire(format!("{label} cannot be negative.")))
}

impl TryFrom<&AccountId> for AccountIdMessage {
    type Error = TrustError;

    /// Sentinels have no wire form and are rejected.
    fn try_from(id: &AccountId) -> Result<Self, Self::Error> {
        if id.is_none() {
            return Err(TrustError::invalid_argument(
                "account_id",
                "A sentinel account identifier cannot be encoded.",
            ));
        }
        let account = match id {
            AccountId::Address(address) => account_id::Account::AccountNum(wire_int(address.num())),
            AccountId::Alias(alias) => {
                account_id::Account::Alias(encode_endorsement(&alias.endorsement()))
            }
            AccountId::Moniker(moniker) => account_id::Account::Alias(moniker.as_bytes().to_vec()),
        };
        Ok(AccountIdMessage {
            shard_num: wire_int(id.shard()),
            realm_num: wire_int(id.realm()),
            account: Some(account),
        })
    }
}

impl TryFrom<AccountIdMessage> for AccountId {
    type Error = TrustError;

    fn try_from(message: AccountIdMessage) -> Result<Self, Self::Error> {
        let shard = wire_u64(message.shard_num, "Shard Number")?;
        let realm = wire_u64(message.realm_num, "Realm Number")?;
        match message.account {
            Some(account_id::Account::AccountNum(num)) => {
                Ok(Address::new(shard, realm, wire_u64(num, "Account Number")?).into())
            }
            Some(account_id::Account::Alias(bytes)) if bytes.len() == 20 => {
                Ok(Moniker::new(shard, realm, &bytes)?.into())
            }
            Some(account_id::Account::Alias(bytes)) => {
                let endorsement = decode_endorsement(&bytes)?;
                Alias::from_endorsement(shard, realm, &endorsement)
                    .map(AccountId::from)
                    .map_err(|e| TrustError::Wire(e.to_string()))
            }
            None => Err(TrustError::Wire("account id has no account set".into())),
        }
    }
}

// =============================================================================
// SignatureMap <-> wire
// =============================================================================

impl From<&SignatureMap> for SignatureMapMessage {
    fn from(map: &SignatureMap) -> Self {
        let sig_pair = map
            .iter()
            .map(|pair| SignaturePairMessage {
                pub_key_prefix: pair.public_key_prefix.clone(),
                signature: Some(match pair.key_type {
                    KeyType::Ed25519 => signature_pair::Signature::Ed25519(pair.signature.clone()),
                    KeyType::EcdsaSecp256k1 => {
                        signature_pair::Signature::EcdsaSecp256k1(pair.signature.clone())
                    }
                }),
            })
            .collect();
        SignatureMapMessage { sig_pair }
    }
}

impl From<SignatureMapMessage> for SignatureMap {
    /// Pairs using signature schemes without a matching key type can never
    /// satisfy an endorsement and are dropped.
    fn from(message: SignatureMapMessage) -> Self {
        message
            .sig_pair
            .into_iter()
            .filter_map(|pair| {
                let (key_type, signature) = match pair.signature? {
                    signature_pair::Signature::Ed25519(sig) => (KeyType::Ed25519, sig),
                    signature_pair::Signature::EcdsaSecp256k1(sig) => {
                        (KeyType::EcdsaSecp256k1, sig)
                    }
                    _ => {
                        tracing::trace!("dropping signature pair with unsupported scheme");
                        return None;
                    }
                };
                Some(SignaturePair::new(pair.pub_key_prefix, key_type, signature))
            })
            .collect()
    }
}
