//! # Signature Map
//!
//! Ordered collection of `(public key prefix, key type, signature)` entries
//! gathered from one or more signatories. Duplicates and entries that match
//! no key are allowed; satisfaction simply ignores them.

use crate::config::SigningConfig;
use crate::domain::endorsement::Endorsement;
use crate::domain::errors::TrustError;
use crate::domain::invoice::Invoice;
use crate::domain::satisfaction;
use crate::domain::signatory::Signatory;
use crate::domain::wire::SignatureMapMessage;
use prost::Message;
use trust_crypto::KeyType;

/// One collected signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignaturePair {
    /// Leading bytes of the signer's raw public key (possibly all of them)
    pub public_key_prefix: Vec<u8>,
    /// Scheme the signature was produced with
    pub key_type: KeyType,
    /// Signature bytes
    pub signature: Vec<u8>,
}

impl SignaturePair {
    pub fn new(public_key_prefix: Vec<u8>, key_type: KeyType, signature: Vec<u8>) -> Self {
        Self {
            public_key_prefix,
            key_type,
            signature,
        }
    }
}

/// Signatures collected for a single message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureMap {
    pairs: Vec<SignaturePair>,
}

impl SignatureMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair as-is.
    pub fn push(&mut self, pair: SignaturePair) {
        self.pairs.push(pair);
    }

    /// Ask `signatory` to sign `message` with the default configuration and
    /// append its signatures.
    pub async fn add_signature(
        &mut self,
        message: &[u8],
        signatory: &Signatory,
    ) -> Result<(), TrustError> {
        self.add_signature_with(&Invoice::new(message), signatory, &SigningConfig::default())
            .await
    }

    /// Ask `signatory` to sign `invoice` and append its signatures.
    ///
    /// Nothing is appended unless every part of the signatory succeeds.
    pub async fn add_signature_with(
        &mut self,
        invoice: &Invoice,
        signatory: &Signatory,
        config: &SigningConfig,
    ) -> Result<(), TrustError> {
        let pairs = signatory.sign(invoice, config).await?;
        self.pairs.extend(pairs);
        Ok(())
    }

    /// Whether the collected signatures meet `endorsement` for `message`.
    pub fn satisfies(&self, message: &[u8], endorsement: &Endorsement) -> bool {
        satisfaction::satisfies(message, endorsement, self)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignaturePair> {
        self.pairs.iter()
    }

    /// Serialize as a protobuf `SignatureMap`.
    pub fn to_protobuf_bytes(&self) -> Vec<u8> {
        SignatureMapMessage::from(self).encode_to_vec()
    }

    /// Decode a protobuf `SignatureMap`.
    pub fn from_protobuf_bytes(bytes: &[u8]) -> Result<Self, TrustError> {
        Ok(SignatureMapMessage::decode(bytes)?.into())
    }
}

impl Extend<SignaturePair> for SignatureMap {
    fn extend<I: IntoIterator<Item = SignaturePair>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}

impl FromIterator<SignaturePair> for SignatureMap {
    fn from_iter<I: IntoIterator<Item = SignaturePair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SignatureMap {
    type Item = SignaturePair;
    type IntoIter = std::vec::IntoIter<SignaturePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a SignatureMap {
    type Item = &'a SignaturePair;
    type IntoIter = std::slice::Iter<'a, SignaturePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
