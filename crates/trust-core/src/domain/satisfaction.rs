//! # Satisfaction
//!
//! Decides whether a set of collected signatures meets an endorsement.
//!
//! ## Rules
//!
//! - A key is satisfied when some pair of the same key type, whose prefix
//!   is a prefix of the key's raw bytes, carries a valid signature.
//! - A list is satisfied when at least `required_count` children are.
//! - Contracts and the empty endorsement are never satisfied here.
//!
//! Unmatched or malformed pairs are ignored, never reported as errors.

use crate::domain::endorsement::{Endorsement, EndorsementKind};
use crate::domain::signature_map::SignatureMap;
use trust_crypto::PublicKey;

/// Evaluate `endorsement` against `signatures` for `message`.
pub fn satisfies(message: &[u8], endorsement: &Endorsement, signatures: &SignatureMap) -> bool {
    match endorsement.kind() {
        EndorsementKind::Empty | EndorsementKind::Contract(_) => false,
        EndorsementKind::Key(key) => key_is_signed(message, key, signatures),
        EndorsementKind::List {
            required_count,
            children,
        } => {
            // Every child is evaluated; no early exit.
            let satisfied = children
                .iter()
                .filter(|child| satisfies(message, child, signatures))
                .count();
            satisfied >= *required_count as usize
        }
    }
}

fn key_is_signed(message: &[u8], key: &PublicKey, signatures: &SignatureMap) -> bool {
    let raw = key.as_raw_bytes();
    signatures
        .iter()
        .filter(|pair| pair.key_type == key.key_type() && raw.starts_with(&pair.public_key_prefix))
        .any(|pair| key.verify(message, &pair.signature))
}
