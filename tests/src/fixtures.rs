//! Deterministic keys and helpers shared by tests and benchmarks.

use trust_core::{Endorsement, PrivateKey, Signatory};
use trust_crypto::{Ed25519KeyPair, Secp256k1KeyPair};

/// Ed25519 key derived from a repeated seed byte.
pub fn ed25519_key(seed: u8) -> PrivateKey {
    PrivateKey::Ed25519(Ed25519KeyPair::from_seed([seed; 32]))
}

/// secp256k1 key derived from a repeated scalar byte (must be non-zero).
pub fn secp256k1_key(seed: u8) -> PrivateKey {
    PrivateKey::EcdsaSecp256k1(
        Secp256k1KeyPair::from_bytes([seed.max(1); 32]).expect("non-zero scalar below order"),
    )
}

/// Alternate key types: even seeds Ed25519, odd seeds secp256k1.
pub fn mixed_key(seed: u8) -> PrivateKey {
    if seed % 2 == 0 {
        ed25519_key(seed)
    } else {
        secp256k1_key(seed)
    }
}

pub fn endorsement_of(key: &PrivateKey) -> Endorsement {
    Endorsement::from_public_key(key.public_key())
}

pub fn signatory_of(key: &PrivateKey) -> Signatory {
    Signatory::from_key(key.clone())
}
