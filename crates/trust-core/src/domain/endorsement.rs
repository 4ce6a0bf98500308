//! # Endorsements
//!
//! An endorsement is the signing requirement attached to an account or
//! entity: a single public key, a smart contract, or an m-of-n list of
//! nested endorsements. Values are immutable once built.
//!
//! Equality is structural and independent of the input encoding, so a key
//! supplied as raw bytes equals the same key supplied as DER.

use crate::domain::address::AccountId;
use crate::domain::errors::TrustError;
use crate::domain::wire;
use std::fmt;
use trust_crypto::{parse_public_key, parse_public_key_as, KeyType, PublicKey};

/// Variant of an [`Endorsement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndorsementType {
    /// Single Ed25519 key
    Ed25519,
    /// Single ECDSA secp256k1 key
    EcdsaSecp256k1,
    /// Smart contract authority
    Contract,
    /// m-of-n list (including the empty [`Endorsement::NONE`])
    List,
}

impl From<KeyType> for EndorsementType {
    fn from(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Ed25519 => EndorsementType::Ed25519,
            KeyType::EcdsaSecp256k1 => EndorsementType::EcdsaSecp256k1,
        }
    }
}

/// Output format for [`Endorsement::to_bytes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyFormat {
    /// Protobuf `Key` encoding
    #[default]
    Default,
    /// Raw key bytes; single keys only
    Raw,
    /// DER `SubjectPublicKeyInfo`; single keys only
    Der,
    /// Protobuf `Key` encoding
    Protobuf,
    /// Protobuf `Key` encoding as consumed by the network
    Hedera,
    /// Protobuf `Key` encoding as published by mirror nodes
    Mirror,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) enum EndorsementKind {
    Empty,
    Key(PublicKey),
    Contract(AccountId),
    List {
        required_count: u32,
        children: Vec<Endorsement>,
    },
}

/// A signing requirement.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Endorsement {
    kind: EndorsementKind,
}

impl Endorsement {
    /// The empty requirement. Nothing satisfies it.
    pub const NONE: Endorsement = Endorsement {
        kind: EndorsementKind::Empty,
    };

    /// Build a single-key endorsement from untrusted bytes.
    ///
    /// Accepts raw keys, DER `SubjectPublicKeyInfo` and serialized protobuf
    /// `Key` messages. The curve is sniffed from the encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrustError> {
        match parse_public_key(bytes) {
            Ok(key) => Ok(Self::from_public_key(key)),
            // Shapes that can only be raw or DER keys report the key error.
            Err(e) if matches!(bytes.len(), 32 | 33 | 65) || bytes.first() == Some(&0x30) => {
                Err(TrustError::invalid_key("public_key", e))
            }
            Err(e) => wire::decode_endorsement(bytes)
                .map_err(|_| TrustError::invalid_key("public_key", e)),
        }
    }

    /// Build a single-key endorsement that must be of the declared type.
    pub fn with_key_type(key_type: KeyType, bytes: &[u8]) -> Result<Self, TrustError> {
        if let Ok(key) = parse_public_key_as(key_type, bytes) {
            return Ok(Self::from_public_key(key));
        }
        let mismatch = || {
            TrustError::invalid_argument(
                "public_key",
                format!(
                    "The public key was not provided in a recognizable {} format.",
                    key_type.format_name()
                ),
            )
        };
        match wire::decode_endorsement(bytes) {
            Ok(endorsement)
                if endorsement.public_key().map(PublicKey::key_type) == Some(key_type) =>
            {
                Ok(endorsement)
            }
            _ => Err(mismatch()),
        }
    }

    /// Wrap an already validated key.
    pub fn from_public_key(key: PublicKey) -> Self {
        Self {
            kind: EndorsementKind::Key(key),
        }
    }

    /// Require every child to be satisfied.
    pub fn list(children: Vec<Endorsement>) -> Result<Self, TrustError> {
        let required = u32::try_from(children.len()).map_err(|_| {
            TrustError::invalid_argument("endorsements", "Too many endorsements in a list.")
        })?;
        Self::threshold(required, children)
    }

    /// Require at least `required_count` children to be satisfied.
    pub fn threshold(required_count: u32, children: Vec<Endorsement>) -> Result<Self, TrustError> {
        if children.is_empty() {
            return Err(TrustError::invalid_argument(
                "endorsements",
                "At least one endorsement in a list is required.",
            ));
        }
        if children.iter().any(Endorsement::is_none) {
            return Err(TrustError::invalid_argument(
                "endorsements",
                "The empty endorsement cannot be a member of a list.",
            ));
        }
        if required_count == 0 {
            return Err(TrustError::invalid_argument(
                "required_count",
                "The required number of keys must be at least one.",
            ));
        }
        if required_count as usize > children.len() {
            return Err(TrustError::invalid_argument(
                "required_count",
                "The required number of keys for a valid signature cannot exceed the number of public keys provided.",
            ));
        }
        Ok(Self {
            kind: EndorsementKind::List {
                required_count,
                children,
            },
        })
    }

    /// Require the authority of a smart contract.
    ///
    /// Contracts are named by numeric address or EVM moniker; key aliases
    /// are rejected.
    pub fn contract(id: impl Into<AccountId>) -> Result<Self, TrustError> {
        let id = id.into();
        if id.is_none() {
            return Err(TrustError::invalid_argument(
                "contract",
                "A contract endorsement requires a contract identifier.",
            ));
        }
        if id.try_as_alias().is_some() {
            return Err(TrustError::invalid_argument(
                "contract",
                "A contract endorsement requires a numeric address or EVM moniker.",
            ));
        }
        Ok(Self {
            kind: EndorsementKind::Contract(id),
        })
    }

    /// Decode a serialized protobuf `Key` of any shape.
    pub fn from_protobuf(bytes: &[u8]) -> Result<Self, TrustError> {
        wire::decode_endorsement(bytes)
    }

    pub(crate) fn kind(&self) -> &EndorsementKind {
        &self.kind
    }

    /// Variant of this endorsement.
    pub fn endorsement_type(&self) -> EndorsementType {
        match &self.kind {
            EndorsementKind::Key(key) => key.key_type().into(),
            EndorsementKind::Contract(_) => EndorsementType::Contract,
            EndorsementKind::Empty | EndorsementKind::List { .. } => EndorsementType::List,
        }
    }

    /// The key of a single-key endorsement.
    pub fn public_key(&self) -> Option<&PublicKey> {
        match &self.kind {
            EndorsementKind::Key(key) => Some(key),
            _ => None,
        }
    }

    /// The contract of a contract endorsement.
    pub fn contract_id(&self) -> Option<&AccountId> {
        match &self.kind {
            EndorsementKind::Contract(id) => Some(id),
            _ => None,
        }
    }

    /// Children of a list; empty otherwise.
    pub fn children(&self) -> &[Endorsement] {
        match &self.kind {
            EndorsementKind::List { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of children that must be satisfied; zero when not a list.
    pub fn required_count(&self) -> u32 {
        match &self.kind {
            EndorsementKind::List { required_count, .. } => *required_count,
            _ => 0,
        }
    }

    /// Whether this is [`Endorsement::NONE`].
    pub fn is_none(&self) -> bool {
        matches!(self.kind, EndorsementKind::Empty)
    }

    /// Verify one signature against a single-key endorsement.
    ///
    /// Returns `Ok(false)` for any bad signature. Lists, contracts and the
    /// empty endorsement cannot be checked against a lone signature.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, TrustError> {
        match &self.kind {
            EndorsementKind::Key(key) => Ok(key.verify(message, signature)),
            EndorsementKind::Contract(_) => Err(TrustError::OperationNotSupported(
                "a contract endorsement cannot verify a signature".into(),
            )),
            EndorsementKind::Empty | EndorsementKind::List { .. } => {
                Err(TrustError::OperationNotSupported(
                    "a list endorsement cannot verify a single signature; use a signature map"
                        .into(),
                ))
            }
        }
    }

    /// Serialize in the requested format.
    ///
    /// `Raw` and `Der` only apply to single keys and are empty for every
    /// other shape. The protobuf formats are never empty.
    pub fn to_bytes(&self, format: KeyFormat) -> Vec<u8> {
        match (format, &self.kind) {
            (KeyFormat::Raw, EndorsementKind::Key(key)) => key.as_raw_bytes().to_vec(),
            (KeyFormat::Der, EndorsementKind::Key(key)) => key.to_der_bytes(),
            (KeyFormat::Raw | KeyFormat::Der, _) => Vec::new(),
            (KeyFormat::Default | KeyFormat::Protobuf | KeyFormat::Hedera | KeyFormat::Mirror, _) => {
                wire::encode_endorsement(self)
            }
        }
    }
}

impl From<PublicKey> for Endorsement {
    fn from(key: PublicKey) -> Self {
        Self::from_public_key(key)
    }
}

impl fmt::Debug for Endorsement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EndorsementKind::Empty => f.write_str("Endorsement::NONE"),
            EndorsementKind::Key(key) => write!(
                f,
                "Endorsement::{}({})",
                key.key_type(),
                hex::encode(key.as_raw_bytes())
            ),
            EndorsementKind::Contract(id) => write!(f, "Endorsement::Contract({id})"),
            EndorsementKind::List {
                required_count,
                children,
            } => f
                .debug_struct("Endorsement::List")
                .field("required_count", required_count)
                .field("children", children)
                .finish(),
        }
    }
}
