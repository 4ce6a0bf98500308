//! # Trust Crypto - Key and Signature Primitives
//!
//! Leaf crate shared by endorsements (public keys) and signatories
//! (private keys). All format sniffing lives in [`keys`] so that no other
//! crate has to inspect raw key bytes.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ed25519` | Ed25519 | Account keys |
//! | `ecdsa` | secp256k1 + Keccak-256 | Account keys, EVM address derivation |
//! | `der` | ASN.1 DER | SubjectPublicKeyInfo / PKCS#8 / SEC1 interchange |
//! | `hashing` | Keccak-256 | Message digest, EVM addresses |
//! | `keys` | - | Format auto-detection, typed key enums |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization
//! - Secret material is zeroized on drop and never printed by `Debug`

#![warn(missing_docs)]
#![warn(clippy::all)]

mod der;
pub mod ecdsa;
pub mod ed25519;
pub mod errors;
pub mod hashing;
pub mod keys;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use errors::CryptoError;
pub use hashing::{evm_address_from_uncompressed, keccak256, Hash};
pub use keys::{
    parse_private_key, parse_private_key_as, parse_public_key, parse_public_key_as, KeyType,
    PrivateKey, PublicKey,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
