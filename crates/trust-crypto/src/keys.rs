//! # Key Parsing
//!
//! Single entry point for turning untrusted key bytes into typed keys.
//! The concrete format is sniffed from the byte shape:
//!
//! | Shape | Public key | Private key |
//! |-------|------------|-------------|
//! | 32 bytes | Ed25519 | Ed25519 seed (or secp256k1 scalar when declared) |
//! | 33 bytes, `0x02`/`0x03` tag | secp256k1 compressed | - |
//! | 65 bytes, `0x04` tag | secp256k1 uncompressed | - |
//! | leading `0x30` | DER `SubjectPublicKeyInfo` | DER PKCS#8 / SEC1 |

use crate::der::{self, DerAlgorithm};
use crate::ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use crate::CryptoError;
use std::fmt;
use zeroize::Zeroizing;

const ANY_FORMAT: &str = "Ed25519 or ECDSA Secp256K1";

/// Signature algorithm of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyType {
    /// Ed25519 EdDSA
    Ed25519,
    /// ECDSA over secp256k1 with a Keccak-256 message digest
    EcdsaSecp256k1,
}

impl KeyType {
    /// Name used in error messages.
    pub fn format_name(self) -> &'static str {
        match self {
            KeyType::Ed25519 => "Ed25519",
            KeyType::EcdsaSecp256k1 => "ECDSA Secp256K1",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_name())
    }
}

impl From<DerAlgorithm> for KeyType {
    fn from(algorithm: DerAlgorithm) -> Self {
        match algorithm {
            DerAlgorithm::Ed25519 => KeyType::Ed25519,
            DerAlgorithm::Secp256k1 => KeyType::EcdsaSecp256k1,
        }
    }
}

/// A validated public key in canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicKey {
    /// 32-byte Ed25519 point
    Ed25519(Ed25519PublicKey),
    /// 33-byte compressed secp256k1 point
    EcdsaSecp256k1(Secp256k1PublicKey),
}

impl PublicKey {
    /// Key algorithm.
    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Ed25519(_) => KeyType::Ed25519,
            PublicKey::EcdsaSecp256k1(_) => KeyType::EcdsaSecp256k1,
        }
    }

    /// Raw key bytes (32 for Ed25519, 33 compressed for secp256k1).
    pub fn as_raw_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(key) => key.as_bytes(),
            PublicKey::EcdsaSecp256k1(key) => key.as_bytes(),
        }
    }

    /// Canonical DER `SubjectPublicKeyInfo`.
    pub fn to_der_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => der::encode_ed25519_public_key(key.as_bytes()),
            PublicKey::EcdsaSecp256k1(key) => der::encode_secp256k1_public_key(key.as_bytes()),
        }
    }

    /// Verify a signature, treating every failure (including malformed
    /// signature bytes) as `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            PublicKey::Ed25519(key) => Ed25519Signature::from_slice(signature)
                .and_then(|sig| key.verify(message, &sig))
                .is_ok(),
            PublicKey::EcdsaSecp256k1(key) => Secp256k1Signature::from_slice(signature)
                .and_then(|sig| key.verify(message, &sig))
                .is_ok(),
        }
    }

    /// EVM address for secp256k1 keys; Ed25519 keys have none.
    pub fn evm_address(&self) -> Option<[u8; 20]> {
        match self {
            PublicKey::Ed25519(_) => None,
            PublicKey::EcdsaSecp256k1(key) => key.to_evm_address().ok(),
        }
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PublicKey::Ed25519(key)
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        PublicKey::EcdsaSecp256k1(key)
    }
}

/// A signing key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrivateKey {
    /// Ed25519 seed
    Ed25519(Ed25519KeyPair),
    /// secp256k1 scalar
    EcdsaSecp256k1(Secp256k1KeyPair),
}

impl PrivateKey {
    /// Key algorithm.
    pub fn key_type(&self) -> KeyType {
        match self {
            PrivateKey::Ed25519(_) => KeyType::Ed25519,
            PrivateKey::EcdsaSecp256k1(_) => KeyType::EcdsaSecp256k1,
        }
    }

    /// Matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Ed25519(pair) => PublicKey::Ed25519(pair.public_key()),
            PrivateKey::EcdsaSecp256k1(pair) => PublicKey::EcdsaSecp256k1(pair.public_key()),
        }
    }

    /// Sign a message, returning the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(pair) => pair.sign(message).as_bytes().to_vec(),
            PrivateKey::EcdsaSecp256k1(pair) => pair.sign(message).as_bytes().to_vec(),
        }
    }

    /// Raw 32-byte secret, wiped on drop.
    pub fn to_raw_bytes(&self) -> Zeroizing<Vec<u8>> {
        match self {
            PrivateKey::Ed25519(pair) => Zeroizing::new(pair.to_seed().to_vec()),
            PrivateKey::EcdsaSecp256k1(pair) => Zeroizing::new(pair.to_bytes().to_vec()),
        }
    }

    /// Canonical DER PKCS#8 `PrivateKeyInfo`, wiped on drop.
    pub fn to_der_bytes(&self) -> Zeroizing<Vec<u8>> {
        match self {
            PrivateKey::Ed25519(pair) => {
                Zeroizing::new(der::encode_ed25519_private_key(&pair.to_seed()))
            }
            PrivateKey::EcdsaSecp256k1(pair) => {
                Zeroizing::new(der::encode_secp256k1_private_key(&pair.to_bytes()))
            }
        }
    }
}

/// Parse a public key in any supported format.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    match bytes {
        _ if bytes.len() == 32 => Ed25519PublicKey::from_slice(bytes).map(PublicKey::from),
        [0x02 | 0x03, ..] if bytes.len() == 33 => {
            Secp256k1PublicKey::from_sec1(bytes).map(PublicKey::from)
        }
        [0x04, ..] if bytes.len() == 65 => {
            Secp256k1PublicKey::from_sec1(bytes).map(PublicKey::from)
        }
        [0x30, ..] => {
            let decoded = der::decode_public_key(bytes).map_err(|_| unrecognized_public())?;
            public_key_from_parts(decoded.algorithm.into(), decoded.key)
        }
        _ => Err(unrecognized_public()),
    }
}

/// Parse a public key that must be of the declared type.
pub fn parse_public_key_as(key_type: KeyType, bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    let key = parse_public_key(bytes).map_err(|_| CryptoError::UnrecognizedPublicKey {
        format: key_type.format_name(),
    })?;
    if key.key_type() != key_type {
        return Err(CryptoError::UnrecognizedPublicKey {
            format: key_type.format_name(),
        });
    }
    Ok(key)
}

fn public_key_from_parts(key_type: KeyType, key: &[u8]) -> Result<PublicKey, CryptoError> {
    match key_type {
        KeyType::Ed25519 => Ed25519PublicKey::from_slice(key).map(PublicKey::from),
        KeyType::EcdsaSecp256k1 => Secp256k1PublicKey::from_sec1(key).map(PublicKey::from),
    }
}

/// Parse a private key in any supported format.
///
/// Raw 32-byte input is read as an Ed25519 seed; use [`parse_private_key_as`]
/// to supply a raw secp256k1 scalar.
pub fn parse_private_key(bytes: &[u8]) -> Result<PrivateKey, CryptoError> {
    match bytes {
        _ if bytes.len() == 32 => private_key_from_parts(KeyType::Ed25519, bytes),
        [0x30, ..] => {
            let decoded = der::decode_private_key(bytes).map_err(|_| unrecognized_private())?;
            private_key_from_parts(decoded.algorithm.into(), decoded.key)
        }
        _ => Err(unrecognized_private()),
    }
}

/// Parse a private key that must be of the declared type.
pub fn parse_private_key_as(key_type: KeyType, bytes: &[u8]) -> Result<PrivateKey, CryptoError> {
    let unrecognized = || CryptoError::UnrecognizedPrivateKey {
        format: key_type.format_name(),
    };
    if bytes.len() == 32 {
        return private_key_from_parts(key_type, bytes).map_err(|_| unrecognized());
    }
    let key = parse_private_key(bytes).map_err(|_| unrecognized())?;
    if key.key_type() != key_type {
        return Err(unrecognized());
    }
    Ok(key)
}

fn private_key_from_parts(key_type: KeyType, key: &[u8]) -> Result<PrivateKey, CryptoError> {
    match key_type {
        KeyType::Ed25519 => {
            let seed: [u8; 32] = key
                .try_into()
                .map_err(|_| CryptoError::UnrecognizedPrivateKey {
                    format: key_type.format_name(),
                })?;
            Ok(PrivateKey::Ed25519(Ed25519KeyPair::from_seed(seed)))
        }
        KeyType::EcdsaSecp256k1 => Secp256k1KeyPair::from_slice(key).map(PrivateKey::EcdsaSecp256k1),
    }
}

fn unrecognized_public() -> CryptoError {
    CryptoError::UnrecognizedPublicKey {
        format: ANY_FORMAT,
    }
}

fn unrecognized_private() -> CryptoError {
    CryptoError::UnrecognizedPrivateKey {
        format: ANY_FORMAT,
    }
}
