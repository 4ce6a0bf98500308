//! # Domain Layer
//!
//! Identifiers, endorsements, signatories and the satisfaction rules.
//! Only external signer calls leave the process.

pub mod address;
pub mod endorsement;
pub mod errors;
pub mod invoice;
pub mod satisfaction;
pub mod signatory;
pub mod signature_map;
pub mod wire;
