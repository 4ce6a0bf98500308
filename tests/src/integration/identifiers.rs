//! # Identifier and Equality Scenarios
//!
//! Equality of account identifiers, endorsements and signatories across
//! every constructor path.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ed25519_key, secp256k1_key};
    use std::collections::HashSet;
    use trust_core::{
        AccountId, Address, Alias, Endorsement, KeyFormat, KeyType, Moniker, Signatory,
        TrustError,
    };

    fn equivalence_holds<T: PartialEq + std::fmt::Debug>(a: &T, b: &T, c: &T) {
        assert_eq!(a, a);
        assert_eq!(a == b, b == a);
        if a == b && b == c {
            assert_eq!(a, c);
        }
    }

    #[test]
    fn test_address_equality_is_an_equivalence() {
        let samples = [
            Address::new(0, 0, 0),
            Address::new(0, 0, 5),
            Address::new(1, 2, 3),
            Address::try_new(1, 2, 3).unwrap(),
            "1.2.3".parse().unwrap(),
            Address::new(u64::MAX, 0, 1),
            Address::NONE,
        ];
        for a in &samples {
            for b in &samples {
                for c in &samples {
                    equivalence_holds(a, b, c);
                }
            }
        }
    }

    #[test]
    fn test_negative_components_fail_construction() {
        for (shard, realm, num, label) in [
            (-1, 0, 0, "Shard Number"),
            (0, -1, 0, "Realm Number"),
            (0, 0, -1, "Account Number"),
            (i64::MIN, i64::MIN, i64::MIN, "Shard Number"),
        ] {
            match Address::try_new(shard, realm, num) {
                Err(TrustError::InvalidArgument { reason, .. }) => {
                    assert_eq!(reason, format!("{label} cannot be negative."));
                }
                other => panic!("expected invalid argument, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_identifier_kinds_are_pairwise_unequal() {
        let public = ed25519_key(1).public_key();
        let address = AccountId::from(Address::new(0, 0, 5));
        let alias = AccountId::from(Alias::from_public_key(0, 0, public));
        let moniker = AccountId::from(Moniker::new(0, 0, &[5u8; 20]).unwrap());

        let ids = [address, alias, moniker];
        for (i, a) in ids.iter().enumerate() {
            for (j, b) in ids.iter().enumerate() {
                assert_eq!(i == j, a == b, "{a} vs {b}");
            }
            assert_eq!(a.shard(), 0);
            assert_eq!(a.realm(), 0);
        }

        let unique: HashSet<AccountId> = ids.into_iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_sentinels_equal_only_themselves() {
        assert_eq!(Address::NONE, Address::NONE);
        assert_eq!(Alias::NONE, Alias::NONE);
        assert_eq!(Moniker::NONE, Moniker::NONE);
        assert_eq!(Endorsement::NONE, Endorsement::NONE);

        assert_ne!(Address::NONE, Address::new(0, 0, 0));
        assert_ne!(Moniker::NONE, Moniker::new(0, 0, &[0u8; 20]).unwrap());
        assert_ne!(Alias::NONE, Alias::from_public_key(0, 0, ed25519_key(1).public_key()));
        assert_ne!(Endorsement::NONE, Endorsement::from(ed25519_key(1).public_key()));

        // Absent values compare without panicking
        let absent: Option<Endorsement> = None;
        assert_ne!(absent, Some(Endorsement::NONE));
    }

    #[test]
    fn test_endorsement_constructor_paths_agree() {
        for key in [ed25519_key(3), secp256k1_key(4)] {
            let public = key.public_key();
            let direct = Endorsement::from_public_key(public);

            let paths = [
                Endorsement::from_bytes(public.as_raw_bytes()).unwrap(),
                Endorsement::from_bytes(&public.to_der_bytes()).unwrap(),
                Endorsement::with_key_type(public.key_type(), public.as_raw_bytes()).unwrap(),
                Endorsement::from_bytes(&direct.to_bytes(KeyFormat::Protobuf)).unwrap(),
                Endorsement::from_bytes(&direct.to_bytes(KeyFormat::Der)).unwrap(),
                Alias::new(0, 0, &public.to_der_bytes()).unwrap().endorsement(),
                Alias::from_endorsement(0, 0, &direct).unwrap().endorsement(),
            ];
            for endorsement in &paths {
                assert_eq!(endorsement, &direct);
            }

            let hashed: HashSet<&Endorsement> = paths.iter().collect();
            assert_eq!(hashed.len(), 1);
        }
    }

    #[test]
    fn test_uncompressed_secp256k1_equals_compressed() {
        let key = secp256k1_key(9);
        let compressed = key.public_key();
        let trust_crypto::PublicKey::EcdsaSecp256k1(point) = compressed else {
            panic!("expected secp256k1 key");
        };
        let uncompressed = point.to_uncompressed().unwrap();

        assert_eq!(
            Endorsement::from_bytes(&uncompressed).unwrap(),
            Endorsement::from_bytes(compressed.as_raw_bytes()).unwrap()
        );
    }

    #[test]
    fn test_unrecognized_key_messages_are_curve_specific() {
        let err = Endorsement::with_key_type(KeyType::EcdsaSecp256k1, &[7u8; 20]).unwrap_err();
        assert!(err
            .to_string()
            .contains("not provided in a recognizable ECDSA Secp256K1 format"));

        let err = Endorsement::with_key_type(KeyType::Ed25519, &[7u8; 20]).unwrap_err();
        assert!(err
            .to_string()
            .contains("not provided in a recognizable Ed25519 format"));
    }

    #[test]
    fn test_signatory_constructor_paths_agree() {
        let key = secp256k1_key(12);
        let raw = key.to_raw_bytes();
        let der = key.to_der_bytes();

        let from_der = Signatory::from_private_key(&der).unwrap();
        let from_raw = Signatory::with_key_type(KeyType::EcdsaSecp256k1, &raw).unwrap();
        assert_eq!(from_der, from_raw);
        assert_eq!(from_der, Signatory::from_key(key));
    }

    #[test]
    fn test_moniker_matches_secp256k1_alias() {
        let public = secp256k1_key(1).public_key();
        let endorsement = Endorsement::from_public_key(public);
        let moniker = Moniker::from_endorsement(0, 0, &endorsement).unwrap();

        assert_eq!(Some(*moniker.as_bytes()), public.evm_address());
        assert_ne!(
            AccountId::from(moniker),
            AccountId::from(Alias::from_endorsement(0, 0, &endorsement).unwrap())
        );
    }
}
