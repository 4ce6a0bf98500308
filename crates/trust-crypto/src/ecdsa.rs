//! # ECDSA Signatures (secp256k1)
//!
//! ECDSA signatures using the secp256k1 curve over a Keccak-256 digest of
//! the message, matching the ledger's `ECDSA_secp256k1` key type.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization on signing, high-S rejected on verification
//! - Constant-time operations

use crate::hashing::evm_address_from_uncompressed;
use crate::CryptoError;
use k256::ecdsa::{
    signature::{DigestSigner, DigestVerifier},
    Signature, SigningKey, VerifyingKey,
};
use sha3::{Digest, Keccak256};

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        // Validate it's a valid compressed point
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| unrecognized())?;
        Ok(Self(bytes))
    }

    /// Create from any SEC1 encoding (compressed or uncompressed).
    ///
    /// The key is always stored in compressed form so that both encodings
    /// of the same point compare equal.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| unrecognized())?;
        Ok(Self::from_verifying_key(&verifying_key))
    }

    fn from_verifying_key(verifying_key: &VerifyingKey) -> Self {
        let encoded = verifying_key.to_encoded_point(true);
        // SEC1 compressed public key is always exactly 33 bytes
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(encoded.as_bytes());
        Self(bytes)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Get the 65-byte uncompressed encoding (`0x04 || x || y`).
    pub fn to_uncompressed(&self) -> Result<Vec<u8>, CryptoError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| unrecognized())?;
        Ok(verifying_key.to_encoded_point(false).as_bytes().to_vec())
    }

    /// Verify a signature over the Keccak-256 digest of `message`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| unrecognized())?;

        let sig = Signature::from_slice(&signature.0)
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;

        verifying_key
            .verify_digest(Keccak256::new_with_prefix(message), &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Derive the EVM address (last 20 bytes of Keccak-256 of the uncompressed point).
    pub fn to_evm_address(&self) -> Result<[u8; 20], CryptoError> {
        let uncompressed = self.to_uncompressed()?;
        Ok(evm_address_from_uncompressed(&uncompressed))
    }
}

fn unrecognized() -> CryptoError {
    CryptoError::UnrecognizedPublicKey {
        format: "ECDSA Secp256K1",
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create from untrusted bytes, rejecting anything but 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// secp256k1 ECDSA keypair.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        Self::from_slice(&bytes)
    }

    /// Create from a big-endian scalar, left-padding short encodings.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() || bytes.len() > 32 {
            return Err(CryptoError::UnrecognizedPrivateKey {
                format: "ECDSA Secp256K1",
            });
        }
        let mut scalar = zeroize::Zeroizing::new([0u8; 32]);
        scalar[32 - bytes.len()..].copy_from_slice(bytes);

        let signing_key =
            SigningKey::from_slice(&scalar[..]).map_err(|_| CryptoError::UnrecognizedPrivateKey {
                format: "ECDSA Secp256K1",
            })?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign the Keccak-256 digest of a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self
            .signing_key
            .sign_digest(Keccak256::new_with_prefix(message));
        let bytes: [u8; 64] = sig.to_bytes().into();
        Secp256k1Signature(bytes)
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &hex::encode(self.public_key().as_bytes()))
            .finish_non_exhaustive()
    }
}
