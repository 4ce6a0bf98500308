//! # Authorization Flows
//!
//! Signing with signatory trees and evaluating endorsement trees built from
//! the same key material, through both the domain API and the service.
//!
//! ## Flows Tested:
//!
//! 1. **Matching trees**: a signatory built from the keys of an endorsement satisfies it
//! 2. **Unanimous vs threshold**: dropping a leaf breaks unanimity, not k-of-n
//! 3. **Nested branches**: 1-of-2 over 1-of-2 pairs, and the 2-of-2 compound form
//! 4. **Untrusted input**: garbage pairs never flip a satisfied map
//! 5. **Callbacks**: timeouts and failures abort the whole collection

#[cfg(test)]
mod tests {
    use crate::fixtures::{ed25519_key, endorsement_of, mixed_key, secp256k1_key, signatory_of};
    use std::sync::Arc;
    use std::time::Duration;
    use trust_core::{
        AuthorizationApi, AuthorizationService, Endorsement, ExternalSigner, ExternalSignerError,
        FnSigner, Invoice, KeyType, PrivateKey, Signatory, SignatureMap, SignaturePair,
        SigningConfig, TrustError,
    };

    const MESSAGE: &[u8] = b"CryptoTransfer 0.0.1001 -> 0.0.98 : 25 hbar";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Sign with exactly the given keys.
    async fn sign_with(keys: &[&PrivateKey]) -> SignatureMap {
        let mut map = SignatureMap::new();
        for key in keys {
            map.add_signature(MESSAGE, &signatory_of(key)).await.unwrap();
        }
        map
    }

    /// Two 1-of-2 branches: (1a, 1b) and (2a, 2b).
    fn branch_keys() -> [PrivateKey; 4] {
        [ed25519_key(10), secp256k1_key(11), secp256k1_key(20), ed25519_key(21)]
    }

    fn one_of(a: &PrivateKey, b: &PrivateKey) -> Endorsement {
        Endorsement::threshold(1, vec![endorsement_of(a), endorsement_of(b)]).unwrap()
    }

    // =============================================================================
    // MATCHING TREES
    // =============================================================================

    #[tokio::test]
    async fn test_signatory_tree_satisfies_endorsement_tree_from_same_keys() {
        let keys: Vec<PrivateKey> = (1..=6).map(mixed_key).collect();

        let endorsement = Endorsement::list(vec![
            endorsement_of(&keys[0]),
            Endorsement::threshold(2, keys[1..4].iter().map(endorsement_of).collect()).unwrap(),
            Endorsement::list(keys[4..].iter().map(endorsement_of).collect()).unwrap(),
        ])
        .unwrap();

        let signatory = Signatory::composite(vec![
            signatory_of(&keys[0]),
            Signatory::composite(keys[1..4].iter().map(signatory_of).collect()).unwrap(),
            Signatory::composite(keys[4..].iter().map(signatory_of).collect()).unwrap(),
        ])
        .unwrap();

        let map = signatory.sign_async(MESSAGE).await.unwrap();
        assert_eq!(map.len(), 6);
        assert!(map.satisfies(MESSAGE, &endorsement));
        assert!(trust_core::satisfies(MESSAGE, &endorsement, &map));
        assert!(!map.satisfies(b"a different transaction", &endorsement));
    }

    #[tokio::test]
    async fn test_endorsements_derived_from_signatory_are_satisfied() {
        let signatory = Signatory::composite(vec![
            signatory_of(&ed25519_key(1)),
            signatory_of(&secp256k1_key(2)),
        ])
        .unwrap();
        let endorsement = Endorsement::list(signatory.endorsements()).unwrap();

        let map = signatory.sign_async(MESSAGE).await.unwrap();
        assert!(map.satisfies(MESSAGE, &endorsement));
    }

    // =============================================================================
    // UNANIMOUS VS THRESHOLD
    // =============================================================================

    #[tokio::test]
    async fn test_removing_a_leaf_breaks_unanimous_list() {
        let keys: Vec<PrivateKey> = (1..=4).map(mixed_key).collect();
        let unanimous = Endorsement::list(keys.iter().map(endorsement_of).collect()).unwrap();

        let all: Vec<&PrivateKey> = keys.iter().collect();
        assert!(sign_with(&all).await.satisfies(MESSAGE, &unanimous));

        for skipped in 0..keys.len() {
            let subset: Vec<&PrivateKey> = keys
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skipped)
                .map(|(_, key)| key)
                .collect();
            assert!(!sign_with(&subset).await.satisfies(MESSAGE, &unanimous));
        }
    }

    #[tokio::test]
    async fn test_threshold_holds_for_every_large_enough_subset() {
        let keys: Vec<PrivateKey> = (1..=4).map(mixed_key).collect();
        let two_of_four =
            Endorsement::threshold(2, keys.iter().map(endorsement_of).collect()).unwrap();

        for mask in 0u8..16 {
            let subset: Vec<&PrivateKey> = keys
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, key)| key)
                .collect();
            let satisfied = sign_with(&subset).await.satisfies(MESSAGE, &two_of_four);
            assert_eq!(satisfied, subset.len() >= 2, "mask {mask:04b}");
        }
    }

    // =============================================================================
    // NESTED BRANCHES
    // =============================================================================

    #[tokio::test]
    async fn test_one_of_two_branches() {
        let [k1a, k1b, k2a, k2b] = branch_keys();
        let endorsement =
            Endorsement::threshold(1, vec![one_of(&k1a, &k1b), one_of(&k2a, &k2b)]).unwrap();

        assert!(sign_with(&[&k1b, &k2a]).await.satisfies(MESSAGE, &endorsement));
        // Deliberately departs from the worked example that expects {1a} to fail:
        // an outer threshold of one counts one satisfied branch, and {1a} satisfies
        // the first. The "one per branch" rule is the 2-of-2 compound below.
        assert!(sign_with(&[&k1a]).await.satisfies(MESSAGE, &endorsement));
        assert!(!sign_with(&[]).await.satisfies(MESSAGE, &endorsement));
    }

    #[tokio::test]
    async fn test_compound_requires_one_signature_from_each_pair() {
        let [k1a, k1b, k2a, k2b] = branch_keys();
        let compound = Endorsement::list(vec![one_of(&k1a, &k1b), one_of(&k2a, &k2b)]).unwrap();

        assert!(sign_with(&[&k1b, &k2a]).await.satisfies(MESSAGE, &compound));
        assert!(sign_with(&[&k1a, &k2b]).await.satisfies(MESSAGE, &compound));
        assert!(!sign_with(&[&k1a]).await.satisfies(MESSAGE, &compound));
        assert!(!sign_with(&[&k1a, &k1b]).await.satisfies(MESSAGE, &compound));

        // The transaction layer rejects the short map outright
        let service = AuthorizationService::default();
        let err = service
            .authorize(&Invoice::new(MESSAGE), &compound, &signatory_of(&k1a))
            .await
            .unwrap_err();
        assert_eq!(err, TrustError::InvalidSignature);
    }

    // =============================================================================
    // UNTRUSTED INPUT
    // =============================================================================

    #[tokio::test]
    async fn test_garbage_entries_never_flip_satisfaction() {
        let keys: Vec<PrivateKey> = (1..=3).map(mixed_key).collect();
        let endorsement = Endorsement::list(keys.iter().map(endorsement_of).collect()).unwrap();
        let mut map = sign_with(&keys.iter().collect::<Vec<_>>()).await;
        assert!(map.satisfies(MESSAGE, &endorsement));

        let prefix = keys[0].public_key().as_raw_bytes()[..4].to_vec();
        let garbage = vec![
            SignaturePair::new(vec![], KeyType::Ed25519, vec![]),
            SignaturePair::new(prefix.clone(), KeyType::Ed25519, vec![0xAA; 64]),
            SignaturePair::new(prefix, KeyType::EcdsaSecp256k1, vec![0xBB; 7]),
            SignaturePair::new(vec![0xFF; 100], KeyType::EcdsaSecp256k1, vec![0; 64]),
        ];
        for pair in garbage {
            map.push(pair);
            assert!(map.satisfies(MESSAGE, &endorsement));
        }

        let random: Vec<SignaturePair> = (0..32)
            .map(|_| {
                SignaturePair::new(
                    (0..rand::random::<u8>() % 40).map(|_| rand::random()).collect(),
                    if rand::random() {
                        KeyType::Ed25519
                    } else {
                        KeyType::EcdsaSecp256k1
                    },
                    (0..64).map(|_| rand::random()).collect(),
                )
            })
            .collect();
        map.extend(random);
        assert!(map.satisfies(MESSAGE, &endorsement));
    }

    #[tokio::test]
    async fn test_truncated_prefix_still_matches() {
        let key = secp256k1_key(7);
        let full = signatory_of(&key).sign_async(MESSAGE).await.unwrap();
        let truncated: SignatureMap = full
            .into_iter()
            .map(|mut pair| {
                pair.public_key_prefix.truncate(6);
                pair
            })
            .collect();

        assert!(truncated.satisfies(MESSAGE, &endorsement_of(&key)));
    }

    // =============================================================================
    // CALLBACKS
    // =============================================================================

    /// Signer that approves only after a delay.
    struct SlowApprover {
        key: PrivateKey,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl ExternalSigner for SlowApprover {
        async fn sign(&self, invoice: &Invoice) -> Result<Vec<SignaturePair>, ExternalSignerError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![SignaturePair::new(
                self.key.public_key().as_raw_bytes().to_vec(),
                self.key.key_type(),
                self.key.sign(invoice.message()),
            )])
        }
    }

    #[tokio::test]
    async fn test_callback_within_limit_contributes_signature() {
        let remote = ed25519_key(30);
        let endorsement =
            Endorsement::list(vec![endorsement_of(&ed25519_key(31)), endorsement_of(&remote)])
                .unwrap();
        let signatory = Signatory::composite(vec![
            signatory_of(&ed25519_key(31)),
            Signatory::callback(Arc::new(SlowApprover {
                key: remote,
                delay: Duration::from_millis(5),
            })),
        ])
        .unwrap();

        let service = AuthorizationService::default();
        let map = service
            .authorize(&Invoice::new(MESSAGE).with_memo("approve"), &endorsement, &signatory)
            .await
            .unwrap();
        assert_eq!(map.len(), 2);
    }

    #[tokio::test]
    async fn test_callback_timeout_aborts_whole_collection() {
        let signatory = Signatory::composite(vec![
            signatory_of(&ed25519_key(40)),
            Signatory::callback(Arc::new(SlowApprover {
                key: ed25519_key(41),
                delay: Duration::from_secs(10),
            })),
        ])
        .unwrap();

        for parallel in [true, false] {
            let config = SigningConfig::default()
                .with_callback_timeout(Some(Duration::from_millis(25)))
                .with_parallel_signing(parallel);

            let mut map = SignatureMap::new();
            let err = map
                .add_signature_with(&Invoice::new(MESSAGE), &signatory, &config)
                .await
                .unwrap_err();

            assert!(matches!(err, TrustError::SigningTimeout { timeout_ms: 25 }));
            assert!(map.is_empty(), "no partial signatures may leak");
        }
    }

    #[tokio::test]
    async fn test_rejecting_callback_surfaces_as_error() {
        let refusing = Signatory::callback(Arc::new(FnSigner::new(|invoice: Invoice| async move {
            Err(ExternalSignerError::Rejected {
                reason: format!("memo '{}' not approved", invoice.memo()),
            })
        })));

        let service = AuthorizationService::default();
        let err = service
            .collect_signatures(&Invoice::new(MESSAGE).with_memo("drain"), &refusing)
            .await
            .unwrap_err();

        match err {
            TrustError::ExternalSigner(message) => assert!(message.contains("drain")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
