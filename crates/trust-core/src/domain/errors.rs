//! # Trust Errors
//!
//! Construction failures are programmer errors and carry the offending
//! parameter; verification paths never produce errors for untrusted input.

use thiserror::Error;
use trust_crypto::CryptoError;

/// Errors produced by the trust core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrustError {
    /// A constructor argument failed validation
    #[error("{reason} (Parameter '{parameter}')")]
    InvalidArgument {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// Human readable cause
        reason: String,
    },

    /// The operation is not defined for this kind of value
    #[error("Operation not supported: {0}")]
    OperationNotSupported(String),

    /// Collected signatures do not satisfy the required endorsement
    #[error("Invalid signature: the collected signatures do not satisfy the endorsement")]
    InvalidSignature,

    /// An external signer did not answer in time
    #[error("External signer did not respond within {timeout_ms} ms")]
    SigningTimeout {
        /// Configured limit in milliseconds
        timeout_ms: u64,
    },

    /// An external signer failed or refused to sign
    #[error("External signer failed: {0}")]
    ExternalSigner(String),

    /// A bounded callback was driven outside a tokio runtime
    #[error("Callback timeouts require a running tokio runtime")]
    RuntimeUnavailable,

    /// Wire message could not be decoded or mapped
    #[error("Malformed wire message: {0}")]
    Wire(String),
}

impl TrustError {
    /// Build an [`TrustError::InvalidArgument`].
    pub fn invalid_argument(parameter: &'static str, reason: impl Into<String>) -> Self {
        TrustError::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }

    /// Wrap a key parsing failure as an invalid argument.
    pub(crate) fn invalid_key(parameter: &'static str, error: CryptoError) -> Self {
        TrustError::invalid_argument(parameter, error.to_string())
    }
}

impl From<prost::DecodeError> for TrustError {
    fn from(error: prost::DecodeError) -> Self {
        TrustError::Wire(error.to_string())
    }
}
