//! # Inbound Ports (Driving Ports / API)
//!
//! The public authorization API. Implementations must be thread-safe.

use crate::domain::endorsement::Endorsement;
use crate::domain::errors::TrustError;
use crate::domain::invoice::Invoice;
use crate::domain::signatory::Signatory;
use crate::domain::signature_map::SignatureMap;
use async_trait::async_trait;

/// Primary authorization API.
///
/// Collects signatures from signatories and decides whether they meet an
/// endorsement.
#[async_trait]
pub trait AuthorizationApi: Send + Sync {
    /// Ask `signatory` to sign `invoice` and return the resulting map.
    ///
    /// # Errors
    /// * `TrustError::SigningTimeout` - An external signer exceeded its limit
    /// * `TrustError::ExternalSigner` - An external signer failed
    async fn collect_signatures(
        &self,
        invoice: &Invoice,
        signatory: &Signatory,
    ) -> Result<SignatureMap, TrustError>;

    /// Whether `signatures` meet `endorsement` for `message`.
    ///
    /// Never fails; malformed entries are ignored.
    fn satisfies(&self, message: &[u8], endorsement: &Endorsement, signatures: &SignatureMap)
        -> bool;

    /// Check a lone signature against a single-key endorsement.
    ///
    /// # Errors
    /// * `TrustError::OperationNotSupported` - `endorsement` is not a single key
    fn verify(
        &self,
        endorsement: &Endorsement,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, TrustError>;

    /// Collect signatures and require that they meet `endorsement`.
    ///
    /// # Errors
    /// * `TrustError::InvalidSignature` - The collected signatures fall short
    /// * Any error from [`AuthorizationApi::collect_signatures`]
    async fn authorize(
        &self,
        invoice: &Invoice,
        endorsement: &Endorsement,
        signatory: &Signatory,
    ) -> Result<SignatureMap, TrustError>;
}
