//! # Keccak-256 Hashing
//!
//! Digest used for secp256k1 message signing and EVM address derivation.

use sha3::{Digest, Keccak256};

/// 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 20-byte EVM address from an uncompressed SEC1 point.
///
/// The leading `0x04` tag is skipped when present; the address is the
/// last 20 bytes of the Keccak-256 digest of the 64 coordinate bytes.
pub fn evm_address_from_uncompressed(point: &[u8]) -> [u8; 20] {
    let coordinates = match point {
        [0x04, rest @ ..] if rest.len() == 64 => rest,
        _ => point,
    };
    let hash = keccak256(coordinates);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
