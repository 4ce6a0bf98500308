//! # ASN.1 DER Key Containers
//!
//! Minimal reader/writer for the handful of DER structures keys travel in:
//!
//! | Structure | Used for |
//! |-----------|----------|
//! | `SubjectPublicKeyInfo` | Ed25519 / secp256k1 public keys |
//! | `PrivateKeyInfo` (PKCS#8) | Ed25519 / secp256k1 private keys |
//! | `ECPrivateKey` (SEC1) | secp256k1 private keys, bare or inside PKCS#8 |
//!
//! secp256k1 algorithm identifiers come in three shapes and all are accepted:
//! `id-ecPublicKey` with the named curve (compacted), `id-ecPublicKey` with
//! explicit `ECParameters` (extended), and the bare curve OID used by older
//! network tooling. Output is always the compacted named-curve form.

use crate::CryptoError;

const TAG_INTEGER: u8 = 0x02;
const TAG_BIT_STRING: u8 = 0x03;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_OID: u8 = 0x06;
const TAG_SEQUENCE: u8 = 0x30;
const TAG_EC_PARAMETERS: u8 = 0xa0;

/// 1.3.101.112
const ED25519_OID: &[u8] = &[0x2b, 0x65, 0x70];
/// 1.2.840.10045.2.1
const EC_PUBLIC_KEY_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
/// 1.3.132.0.10
const SECP256K1_OID: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x0a];
/// 1.2.840.10045.1.1
const PRIME_FIELD_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x01, 0x01];

/// secp256k1 field prime p
const SECP256K1_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

/// secp256k1 curve order n
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

const SECP256K1_SPKI_PREFIX: [u8; 23] = [
    0x30, 0x36, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05, 0x2b,
    0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

const ED25519_PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];

const SECP256K1_PKCS8_PREFIX: [u8; 30] = [
    0x30, 0x3e, 0x02, 0x01, 0x00, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01,
    0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x04, 0x27, 0x30, 0x25, 0x02, 0x01, 0x01,
];

/// Key algorithm named by a DER algorithm identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DerAlgorithm {
    Ed25519,
    Secp256k1,
}

/// A key recovered from a DER container.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DerKey<'a> {
    pub algorithm: DerAlgorithm,
    pub key: &'a [u8],
}

/// Sequential TLV reader over a DER buffer.
struct DerReader<'a> {
    input: &'a [u8],
}

impl<'a> DerReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn peek_tag(&self) -> Option<u8> {
        self.input.first().copied()
    }

    /// Read the next element, returning its tag and content.
    fn read_any(&mut self) -> Result<(u8, &'a [u8]), CryptoError> {
        let (&tag, rest) = self
            .input
            .split_first()
            .ok_or_else(|| malformed("unexpected end of input"))?;
        let (&first, rest) = rest
            .split_first()
            .ok_or_else(|| malformed("missing length"))?;

        let (len, rest) = match first {
            n if n < 0x80 => (n as usize, rest),
            0x81 => match rest.split_first() {
                Some((&n, rest)) => (n as usize, rest),
                None => return Err(malformed("truncated length")),
            },
            0x82 => {
                if rest.len() < 2 {
                    return Err(malformed("truncated length"));
                }
                (((rest[0] as usize) << 8) | rest[1] as usize, &rest[2..])
            }
            _ => return Err(malformed("unsupported length encoding")),
        };

        if rest.len() < len {
            return Err(malformed("content shorter than declared length"));
        }

        let (content, remaining) = rest.split_at(len);
        self.input = remaining;
        Ok((tag, content))
    }

    /// Read the next element, requiring a specific tag.
    fn read(&mut self, expected: u8) -> Result<&'a [u8], CryptoError> {
        let (tag, content) = self.read_any()?;
        if tag != expected {
            return Err(malformed(&format!(
                "expected tag 0x{expected:02x}, found 0x{tag:02x}"
            )));
        }
        Ok(content)
    }
}

fn malformed(reason: &str) -> CryptoError {
    CryptoError::InvalidDer(reason.to_string())
}

/// Decode a single top-level SEQUENCE, rejecting trailing bytes.
fn outer_sequence(input: &[u8]) -> Result<&[u8], CryptoError> {
    let mut reader = DerReader::new(input);
    let content = reader.read(TAG_SEQUENCE)?;
    if !reader.is_empty() {
        return Err(malformed("trailing bytes after structure"));
    }
    Ok(content)
}

fn strip_leading_zeros(value: &[u8]) -> &[u8] {
    let start = value.iter().take_while(|&&b| b == 0).count();
    &value[start..]
}

/// Check explicit `ECParameters` describe secp256k1.
///
/// Only the field prime, curve coefficients and group order are compared;
/// the generator and cofactor are implied by those for this curve.
fn check_explicit_parameters(params: &[u8]) -> Result<(), CryptoError> {
    let mut reader = DerReader::new(params);
    reader.read(TAG_INTEGER)?;

    let mut field = DerReader::new(reader.read(TAG_SEQUENCE)?);
    if field.read(TAG_OID)? != PRIME_FIELD_OID {
        return Err(malformed("explicit parameters are not over a prime field"));
    }
    if strip_leading_zeros(field.read(TAG_INTEGER)?) != SECP256K1_PRIME {
        return Err(malformed("explicit parameters do not describe secp256k1"));
    }

    let mut curve = DerReader::new(reader.read(TAG_SEQUENCE)?);
    let a = strip_leading_zeros(curve.read(TAG_OCTET_STRING)?);
    let b = strip_leading_zeros(curve.read(TAG_OCTET_STRING)?);
    if !a.is_empty() || b != [7] {
        return Err(malformed("explicit parameters do not describe secp256k1"));
    }

    reader.read(TAG_OCTET_STRING)?;
    if strip_leading_zeros(reader.read(TAG_INTEGER)?) != SECP256K1_ORDER {
        return Err(malformed("explicit parameters do not describe secp256k1"));
    }
    Ok(())
}

/// Check the curve named by an `id-ecPublicKey` parameters element.
fn check_curve(tag: u8, content: &[u8]) -> Result<(), CryptoError> {
    match tag {
        TAG_OID if content == SECP256K1_OID => Ok(()),
        TAG_SEQUENCE => check_explicit_parameters(content),
        _ => Err(malformed("unsupported elliptic curve")),
    }
}

fn read_algorithm(content: &[u8]) -> Result<DerAlgorithm, CryptoError> {
    let mut reader = DerReader::new(content);
    let oid = reader.read(TAG_OID)?;

    let algorithm = if oid == ED25519_OID {
        if reader.peek_tag() == Some(TAG_NULL) {
            reader.read(TAG_NULL)?;
        }
        DerAlgorithm::Ed25519
    } else if oid == SECP256K1_OID {
        DerAlgorithm::Secp256k1
    } else if oid == EC_PUBLIC_KEY_OID {
        let (tag, params) = reader.read_any()?;
        check_curve(tag, params)?;
        DerAlgorithm::Secp256k1
    } else {
        return Err(malformed("unsupported algorithm identifier"));
    };

    if !reader.is_empty() {
        return Err(malformed("unexpected algorithm parameters"));
    }
    Ok(algorithm)
}

/// Decode a `SubjectPublicKeyInfo`.
pub(crate) fn decode_public_key(input: &[u8]) -> Result<DerKey<'_>, CryptoError> {
    let mut reader = DerReader::new(outer_sequence(input)?);
    let algorithm = read_algorithm(reader.read(TAG_SEQUENCE)?)?;
    let bits = reader.read(TAG_BIT_STRING)?;
    if !reader.is_empty() {
        return Err(malformed("trailing elements in public key info"));
    }

    match bits.split_first() {
        Some((0, key)) => Ok(DerAlgorithm::into_key(algorithm, key)),
        _ => Err(malformed("public key bit string has unused bits")),
    }
}

/// Decode a PKCS#8 `PrivateKeyInfo` or a bare SEC1 `ECPrivateKey`.
pub(crate) fn decode_private_key(input: &[u8]) -> Result<DerKey<'_>, CryptoError> {
    let mut reader = DerReader::new(outer_sequence(input)?);
    let version = reader.read(TAG_INTEGER)?;

    match reader.peek_tag() {
        // SEC1: version 1 followed directly by the private scalar
        Some(TAG_OCTET_STRING) if version == [1] => decode_ec_private_key_body(reader),
        Some(TAG_SEQUENCE) => {
            let algorithm = read_algorithm(reader.read(TAG_SEQUENCE)?)?;
            let wrapped = reader.read(TAG_OCTET_STRING)?;
            let key = unwrap_private_key(algorithm, wrapped)?;
            Ok(DerKey { algorithm, key })
        }
        _ => Err(malformed("not a recognized private key structure")),
    }
}

/// Unwrap the PKCS#8 `privateKey` octets.
///
/// Ed25519 and the bare-curve secp256k1 form nest an OCTET STRING; the
/// `id-ecPublicKey` form nests a SEC1 `ECPrivateKey`.
fn unwrap_private_key(algorithm: DerAlgorithm, wrapped: &[u8]) -> Result<&[u8], CryptoError> {
    let mut reader = DerReader::new(wrapped);
    match reader.peek_tag() {
        Some(TAG_OCTET_STRING) => {
            let key = reader.read(TAG_OCTET_STRING)?;
            if !reader.is_empty() {
                return Err(malformed("trailing bytes after private key"));
            }
            Ok(key)
        }
        Some(TAG_SEQUENCE) if algorithm == DerAlgorithm::Secp256k1 => {
            let mut body = DerReader::new(reader.read(TAG_SEQUENCE)?);
            if body.read(TAG_INTEGER)? != [1] {
                return Err(malformed("unsupported EC private key version"));
            }
            decode_ec_private_key_body(body).map(|key| key.key)
        }
        _ => Err(malformed("not a recognized private key encoding")),
    }
}

/// Decode the remainder of an `ECPrivateKey` after its version.
fn decode_ec_private_key_body(mut reader: DerReader<'_>) -> Result<DerKey<'_>, CryptoError> {
    let key = reader.read(TAG_OCTET_STRING)?;
    while !reader.is_empty() {
        let (tag, content) = reader.read_any()?;
        if tag == TAG_EC_PARAMETERS {
            let mut params = DerReader::new(content);
            let (tag, curve) = params.read_any()?;
            check_curve(tag, curve)?;
        }
        // [1] publicKey is ignored, the public key is recomputed from the scalar
    }
    Ok(DerKey {
        algorithm: DerAlgorithm::Secp256k1,
        key,
    })
}

impl DerAlgorithm {
    fn into_key(self, key: &[u8]) -> DerKey<'_> {
        DerKey {
            algorithm: self,
            key,
        }
    }
}

/// Canonical Ed25519 `SubjectPublicKeyInfo`.
pub(crate) fn encode_ed25519_public_key(key: &[u8; 32]) -> Vec<u8> {
    [&ED25519_SPKI_PREFIX[..], &key[..]].concat()
}

/// Canonical secp256k1 `SubjectPublicKeyInfo` (named curve, compressed point).
pub(crate) fn encode_secp256k1_public_key(key: &[u8; 33]) -> Vec<u8> {
    [&SECP256K1_SPKI_PREFIX[..], &key[..]].concat()
}

/// Canonical Ed25519 PKCS#8 `PrivateKeyInfo`.
pub(crate) fn encode_ed25519_private_key(seed: &[u8; 32]) -> Vec<u8> {
    [&ED25519_PKCS8_PREFIX[..], &seed[..]].concat()
}

/// Canonical secp256k1 PKCS#8 `PrivateKeyInfo` wrapping a SEC1 `ECPrivateKey`.
pub(crate) fn encode_secp256k1_private_key(scalar: &[u8; 32]) -> Vec<u8> {
    [&SECP256K1_PKCS8_PREFIX[..], &[TAG_OCTET_STRING, 0x20][..], &scalar[..]].concat()
}
