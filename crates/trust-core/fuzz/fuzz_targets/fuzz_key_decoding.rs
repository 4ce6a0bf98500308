//! Fuzz target for key and endorsement decoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/trust-core
//! cargo +nightly fuzz run fuzz_key_decoding
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trust_core::{Endorsement, KeyFormat, Signatory};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to an equal endorsement
    if let Ok(endorsement) = Endorsement::from_protobuf(data) {
        let encoded = endorsement.to_bytes(KeyFormat::Protobuf);
        assert_eq!(Endorsement::from_protobuf(&encoded).ok(), Some(endorsement));
    }

    let _ = Endorsement::from_bytes(data);
    let _ = Signatory::from_private_key(data);
});
