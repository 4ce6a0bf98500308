//! # Authorization Service
//!
//! Application service layer that implements the `AuthorizationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AuthorizationApi`)
//! - Reaches external signers through the outbound port (`ExternalSigner`)
//!   held inside callback signatories
//! - Delegates signing and satisfaction to the domain layer
//! - Records structured logs and Prometheus counters

use crate::config::{ConfigError, SigningConfig};
use crate::domain::endorsement::Endorsement;
use crate::domain::errors::TrustError;
use crate::domain::invoice::Invoice;
use crate::domain::satisfaction;
use crate::domain::signatory::Signatory;
use crate::domain::signature_map::SignatureMap;
use crate::ports::inbound::AuthorizationApi;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use trust_crypto::KeyType;
use trust_telemetry::{
    metric_inc, HistogramTimer, CALLBACK_FAILURES, SATISFACTION_CHECKS, SIGNATURES_PRODUCED,
    SIGNING_DURATION,
};

/// Authorization Service.
///
/// Stateless apart from its configuration; share it freely across tasks.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationService {
    config: SigningConfig,
}

impl AuthorizationService {
    /// Create a service with a validated configuration.
    pub fn new(config: SigningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a service configured from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(SigningConfig::from_env()?)
    }

    /// Active configuration.
    pub fn config(&self) -> &SigningConfig {
        &self.config
    }
}

#[async_trait]
impl AuthorizationApi for AuthorizationService {
    async fn collect_signatures(
        &self,
        invoice: &Invoice,
        signatory: &Signatory,
    ) -> Result<SignatureMap, TrustError> {
        let _timer = HistogramTimer::new(&SIGNING_DURATION);
        debug!(
            signatory = ?signatory.signatory_type(),
            memo = invoice.memo(),
            "collecting signatures"
        );

        let mut signatures = SignatureMap::new();
        if let Err(e) = signatures
            .add_signature_with(invoice, signatory, &self.config)
            .await
        {
            record_failure(&e);
            return Err(e);
        }

        for pair in &signatures {
            metric_inc!(SIGNATURES_PRODUCED, &[key_type_label(pair.key_type)]);
        }
        debug!(count = signatures.len(), "signatures collected");
        Ok(signatures)
    }

    fn satisfies(
        &self,
        message: &[u8],
        endorsement: &Endorsement,
        signatures: &SignatureMap,
    ) -> bool {
        let satisfied = satisfaction::satisfies(message, endorsement, signatures);
        let outcome = if satisfied { "satisfied" } else { "unsatisfied" };
        metric_inc!(SATISFACTION_CHECKS, &[outcome]);
        debug!(
            endorsement = ?endorsement.endorsement_type(),
            pairs = signatures.len(),
            outcome,
            "evaluated endorsement"
        );
        satisfied
    }

    fn verify(
        &self,
        endorsement: &Endorsement,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, TrustError> {
        endorsement.verify(message, signature)
    }

    async fn authorize(
        &self,
        invoice: &Invoice,
        endorsement: &Endorsement,
        signatory: &Signatory,
    ) -> Result<SignatureMap, TrustError> {
        let signatures = self.collect_signatures(invoice, signatory).await?;
        if !self.satisfies(invoice.message(), endorsement, &signatures) {
            warn!(
                endorsement = ?endorsement.endorsement_type(),
                pairs = signatures.len(),
                "authorization rejected"
            );
            return Err(TrustError::InvalidSignature);
        }
        info!(pairs = signatures.len(), "authorization granted");
        Ok(signatures)
    }
}

fn key_type_label(key_type: KeyType) -> &'static str {
    match key_type {
        KeyType::Ed25519 => "ed25519",
        KeyType::EcdsaSecp256k1 => "ecdsa_secp256k1",
    }
}

fn record_failure(error: &TrustError) {
    let reason = match error {
        TrustError::SigningTimeout { .. } => "timeout",
        TrustError::ExternalSigner(_) => "rejected",
        TrustError::RuntimeUnavailable => "no_runtime",
        _ => return,
    };
    metric_inc!(CALLBACK_FAILURES, &[reason]);
}
