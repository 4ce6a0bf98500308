//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Public key bytes did not match any supported shape
    #[error("The public key was not provided in a recognizable {format} format.")]
    UnrecognizedPublicKey {
        /// Human readable name of the expected format(s)
        format: &'static str,
    },

    /// Private key bytes did not match any supported shape
    #[error("The private key was not provided in a recognizable {format} format.")]
    UnrecognizedPrivateKey {
        /// Human readable name of the expected format(s)
        format: &'static str,
    },

    /// ASN.1 DER structure could not be decoded
    #[error("Malformed DER encoding: {0}")]
    InvalidDer(String),

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,
}
