//! # Outbound Ports (Driven Ports / SPI)
//!
//! Signing capabilities delegated outside the library, such as hardware
//! wallets, remote key services or an interactive user prompt.

use crate::domain::invoice::Invoice;
use crate::domain::signature_map::SignaturePair;
use async_trait::async_trait;
use std::future::Future;
use thiserror::Error;

/// Error reported by an external signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalSignerError {
    /// The signer declined the request
    #[error("Signing request rejected: {reason}")]
    Rejected { reason: String },

    /// The signer could not be reached
    #[error("Signer unavailable: {0}")]
    Unavailable(String),
}

/// A signer whose keys are not held by this process.
///
/// Implementations may sign with any number of keys and return one pair per
/// signature. The call may be slow; callers bound it with a timeout.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Sign the invoice message.
    ///
    /// # Errors
    /// * `ExternalSignerError::Rejected` - The request was refused
    /// * `ExternalSignerError::Unavailable` - The signer could not be reached
    async fn sign(&self, invoice: &Invoice) -> Result<Vec<SignaturePair>, ExternalSignerError>;
}

/// Adapts an async closure into an [`ExternalSigner`].
///
/// ```ignore
/// let signer = FnSigner::new(|invoice: Invoice| async move {
///     Ok(vec![remote_sign(invoice.message()).await?])
/// });
/// ```
pub struct FnSigner<F> {
    callback: F,
}

impl<F> FnSigner<F> {
    pub fn new<Fut>(callback: F) -> Self
    where
        F: Fn(Invoice) -> Fut,
        Fut: Future<Output = Result<Vec<SignaturePair>, ExternalSignerError>>,
    {
        Self { callback }
    }
}

#[async_trait]
impl<F, Fut> ExternalSigner for FnSigner<F>
where
    F: Fn(Invoice) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<SignaturePair>, ExternalSignerError>> + Send + 'static,
{
    async fn sign(&self, invoice: &Invoice) -> Result<Vec<SignaturePair>, ExternalSignerError> {
        (self.callback)(invoice.clone()).await
    }
}
