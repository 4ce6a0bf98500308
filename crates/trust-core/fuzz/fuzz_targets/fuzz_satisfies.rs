//! Fuzz target for endorsement satisfaction.
//!
//! Signature maps arrive from untrusted peers. Evaluating one against any
//! endorsement must never panic, and garbage must never satisfy a key.
//!
//! ## Running
//!
//! ```bash
//! cd crates/trust-core
//! cargo +nightly fuzz run fuzz_satisfies
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trust_core::{satisfies, Endorsement, KeyType, SignatureMap, SignaturePair};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzPair {
    prefix: Vec<u8>,
    ecdsa: bool,
    signature: Vec<u8>,
}

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: Vec<u8>,
    /// Serialized key the endorsement is decoded from
    key: Vec<u8>,
    pairs: Vec<FuzzPair>,
    /// Raw bytes fed to the protobuf signature map decoder
    wire_map: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(endorsement) = Endorsement::from_protobuf(&input.key)
        .or_else(|_| Endorsement::from_bytes(&input.key))
    else {
        return;
    };

    let map: SignatureMap = input
        .pairs
        .into_iter()
        .map(|pair| {
            let key_type = if pair.ecdsa {
                KeyType::EcdsaSecp256k1
            } else {
                KeyType::Ed25519
            };
            SignaturePair::new(pair.prefix, key_type, pair.signature)
        })
        .collect();

    // Deterministic, and never panics
    let first = satisfies(&input.message, &endorsement, &map);
    assert_eq!(first, satisfies(&input.message, &endorsement, &map));

    if let Ok(decoded) = SignatureMap::from_protobuf_bytes(&input.wire_map) {
        let _ = decoded.satisfies(&input.message, &endorsement);
    }
});
