//! # Telemetry Scenarios
//!
//! The authorization service reports through the shared Prometheus registry.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ed25519_key, endorsement_of, signatory_of};
    use trust_core::{AuthorizationApi, AuthorizationService, Invoice};
    use trust_telemetry::{encode_metrics, register_metrics, TelemetryConfig};

    #[tokio::test]
    async fn test_authorization_is_visible_in_metrics() {
        register_metrics().unwrap();
        let key = ed25519_key(50);

        let service = AuthorizationService::default();
        service
            .authorize(
                &Invoice::new(b"metered".to_vec()),
                &endorsement_of(&key),
                &signatory_of(&key),
            )
            .await
            .unwrap();

        let text = encode_metrics().unwrap();
        assert!(text.contains("lt_signing_signatures_produced_total{key_type=\"ed25519\"}"));
        assert!(text.contains("lt_authorization_satisfaction_checks_total{outcome=\"satisfied\"}"));
        assert!(text.contains("lt_signing_duration_seconds"));
    }

    #[test]
    fn test_component_config_names_component() {
        let config = TelemetryConfig::for_component("trust-tests");
        assert!(config.service_name.ends_with("trust-tests"));
    }
}
