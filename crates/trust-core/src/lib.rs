//! # Ledger-Trust Core
//!
//! Authorization primitives for a distributed ledger: who an account is,
//! which signatures it requires, and who can produce them.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Identifiers, endorsements, signatories, satisfaction
//! - **Ports Layer** (`ports/`): The authorization API and the external signer SPI
//! - **Service Layer** (`service.rs`): Wires domain logic to ports with logging and metrics
//!
//! ## Example
//!
//! ```ignore
//! let key = Signatory::from_private_key(&seed)?;
//! let endorsement = Endorsement::list(key.endorsements())?;
//! let mut signatures = SignatureMap::new();
//! signatures.add_signature(b"transfer", &key).await?;
//! assert!(signatures.satisfies(b"transfer", &endorsement));
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{ConfigError, SigningConfig, DEFAULT_CALLBACK_TIMEOUT};
pub use domain::address::{AccountId, Address, Alias, Moniker};
pub use domain::endorsement::{Endorsement, EndorsementType, KeyFormat};
pub use domain::errors::TrustError;
pub use domain::invoice::Invoice;
pub use domain::satisfaction::satisfies;
pub use domain::signatory::{Signatory, SignatoryType};
pub use domain::signature_map::{SignatureMap, SignaturePair};
pub use ports::inbound::AuthorizationApi;
pub use ports::outbound::{ExternalSigner, ExternalSignerError, FnSigner};
pub use service::AuthorizationService;
pub use trust_crypto::{KeyType, PrivateKey, PublicKey};
