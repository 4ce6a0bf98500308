//! # Signatories
//!
//! A signatory produces signatures: directly from a private key, by fanning
//! out to child signatories, or by delegating to an [`ExternalSigner`].
//!
//! Signing is all-or-nothing. If any child or callback fails, the whole
//! request fails and the caller receives no pairs.

use crate::config::SigningConfig;
use crate::domain::endorsement::Endorsement;
use crate::domain::errors::TrustError;
use crate::domain::invoice::Invoice;
use crate::domain::signature_map::{SignatureMap, SignaturePair};
use crate::ports::outbound::ExternalSigner;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use trust_crypto::{parse_private_key, parse_private_key_as, KeyType, PrivateKey};

/// Variant of a [`Signatory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatoryType {
    Ed25519,
    EcdsaSecp256k1,
    /// Composite of child signatories
    List,
    /// External signer
    Callback,
}

#[derive(Clone)]
enum SignatoryKind {
    Key(PrivateKey),
    Composite(Vec<Signatory>),
    Callback(Arc<dyn ExternalSigner>),
}

/// Something able to sign an [`Invoice`].
#[derive(Clone)]
pub struct Signatory {
    kind: SignatoryKind,
}

impl Signatory {
    /// Build from private key bytes (raw Ed25519 seed or DER).
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, TrustError> {
        let key = parse_private_key(bytes).map_err(|e| TrustError::invalid_key("private_key", e))?;
        Ok(Self::from_key(key))
    }

    /// Build from private key bytes of a declared type.
    ///
    /// Needed for raw 32-byte secp256k1 scalars, which are otherwise read as
    /// Ed25519 seeds.
    pub fn with_key_type(key_type: KeyType, bytes: &[u8]) -> Result<Self, TrustError> {
        let key = parse_private_key_as(key_type, bytes)
            .map_err(|e| TrustError::invalid_key("private_key", e))?;
        Ok(Self::from_key(key))
    }

    /// Wrap an already parsed key.
    pub fn from_key(key: PrivateKey) -> Self {
        Self {
            kind: SignatoryKind::Key(key),
        }
    }

    /// Combine several signatories; each signs every invoice.
    pub fn composite(children: Vec<Signatory>) -> Result<Self, TrustError> {
        if children.is_empty() {
            return Err(TrustError::invalid_argument(
                "signatories",
                "At least one signatory in a list is required.",
            ));
        }
        Ok(Self {
            kind: SignatoryKind::Composite(children),
        })
    }

    /// Delegate signing to an external signer.
    pub fn callback(signer: Arc<dyn ExternalSigner>) -> Self {
        Self {
            kind: SignatoryKind::Callback(signer),
        }
    }

    /// Variant of this signatory.
    pub fn signatory_type(&self) -> SignatoryType {
        match &self.kind {
            SignatoryKind::Key(key) => match key.key_type() {
                KeyType::Ed25519 => SignatoryType::Ed25519,
                KeyType::EcdsaSecp256k1 => SignatoryType::EcdsaSecp256k1,
            },
            SignatoryKind::Composite(_) => SignatoryType::List,
            SignatoryKind::Callback(_) => SignatoryType::Callback,
        }
    }

    /// Children of a composite; empty otherwise.
    pub fn children(&self) -> &[Signatory] {
        match &self.kind {
            SignatoryKind::Composite(children) => children,
            _ => &[],
        }
    }

    /// Public keys this signatory is known to sign with.
    ///
    /// Callback signers are opaque and contribute nothing.
    pub fn endorsements(&self) -> Vec<Endorsement> {
        match &self.kind {
            SignatoryKind::Key(key) => vec![Endorsement::from_public_key(key.public_key())],
            SignatoryKind::Composite(children) => {
                children.iter().flat_map(Signatory::endorsements).collect()
            }
            SignatoryKind::Callback(_) => Vec::new(),
        }
    }

    /// Produce every signature this signatory contributes for `invoice`.
    ///
    /// Key leaves sign on any executor. A callback bounded by
    /// `callback_timeout` needs a tokio runtime and fails with
    /// [`TrustError::RuntimeUnavailable`] without one.
    pub fn sign<'a>(
        &'a self,
        invoice: &'a Invoice,
        config: &'a SigningConfig,
    ) -> BoxFuture<'a, Result<Vec<SignaturePair>, TrustError>> {
        async move {
            match &self.kind {
                SignatoryKind::Key(key) => Ok(vec![sign_with_key(key, invoice.message())]),
                SignatoryKind::Composite(children) => {
                    let batches = if config.parallel_signing {
                        try_join_all(children.iter().map(|child| child.sign(invoice, config)))
                            .await?
                    } else {
                        let mut batches = Vec::with_capacity(children.len());
                        for child in children {
                            batches.push(child.sign(invoice, config).await?);
                        }
                        batches
                    };
                    Ok(batches.into_iter().flatten().collect())
                }
                SignatoryKind::Callback(signer) => {
                    sign_with_callback(signer.as_ref(), invoice, config.callback_timeout).await
                }
            }
        }
        .boxed()
    }

    /// Sign `message` with the default configuration into a fresh map.
    pub async fn sign_async(&self, message: &[u8]) -> Result<SignatureMap, TrustError> {
        let pairs = self
            .sign(&Invoice::new(message), &SigningConfig::default())
            .await?;
        Ok(pairs.into_iter().collect())
    }
}

fn sign_with_key(key: &PrivateKey, message: &[u8]) -> SignaturePair {
    SignaturePair::new(
        key.public_key().as_raw_bytes().to_vec(),
        key.key_type(),
        key.sign(message),
    )
}

async fn sign_with_callback(
    signer: &dyn ExternalSigner,
    invoice: &Invoice,
    limit: Option<Duration>,
) -> Result<Vec<SignaturePair>, TrustError> {
    let outcome = match limit {
        Some(_) if tokio::runtime::Handle::try_current().is_err() => {
            tracing::warn!("bounded external signer invoked outside a tokio runtime");
            return Err(TrustError::RuntimeUnavailable);
        }
        Some(limit) => tokio::time::timeout(limit, signer.sign(invoice))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "external signer timed out");
                TrustError::SigningTimeout {
                    timeout_ms: limit.as_millis() as u64,
                }
            })?,
        None => signer.sign(invoice).await,
    };
    outcome.map_err(|e| {
        tracing::warn!(error = %e, "external signer failed");
        TrustError::ExternalSigner(e.to_string())
    })
}

impl From<PrivateKey> for Signatory {
    fn from(key: PrivateKey) -> Self {
        Self::from_key(key)
    }
}

impl PartialEq for Signatory {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (SignatoryKind::Key(a), SignatoryKind::Key(b)) => a == b,
            (SignatoryKind::Composite(a), SignatoryKind::Composite(b)) => a == b,
            // Same callback instance; vtable pointers are not compared.
            (SignatoryKind::Callback(a), SignatoryKind::Callback(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl Eq for Signatory {}

impl fmt::Debug for Signatory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SignatoryKind::Key(key) => write!(
                f,
                "Signatory::{}({})",
                key.key_type(),
                hex::encode(key.public_key().as_raw_bytes())
            ),
            SignatoryKind::Composite(children) => {
                f.debug_tuple("Signatory::List").field(children).finish()
            }
            SignatoryKind::Callback(signer) => {
                write!(f, "Signatory::Callback({:p})", Arc::as_ptr(signer) as *const ())
            }
        }
    }
}
