//! # Wire Compatibility
//!
//! Byte-level checks of the encodings exchanged with the network: DER key
//! wrappers, protobuf `Key` trees and protobuf `SignatureMap`s.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ed25519_key, endorsement_of, secp256k1_key, signatory_of};
    use trust_core::{
        Address, Endorsement, KeyFormat, KeyType, Moniker, Signatory, SignatureMap, SignaturePair,
    };

    const ED25519_SPKI_PREFIX: &str = "302a300506032b6570032100";
    const SECP256K1_SPKI_PREFIX: &str = "3036301006072a8648ce3d020106052b8104000a032200";

    #[test]
    fn test_canonical_der_output() {
        let ed = endorsement_of(&ed25519_key(1));
        let der = ed.to_bytes(KeyFormat::Der);
        assert_eq!(der.len(), 44);
        assert!(hex::encode(&der).starts_with(ED25519_SPKI_PREFIX));

        let ec = endorsement_of(&secp256k1_key(1));
        let der = ec.to_bytes(KeyFormat::Der);
        assert_eq!(der.len(), 56);
        assert!(hex::encode(&der).starts_with(SECP256K1_SPKI_PREFIX));
    }

    #[test]
    fn test_key_list_bytes() {
        let a = endorsement_of(&ed25519_key(1));
        let b = endorsement_of(&ed25519_key(2));
        let list = Endorsement::list(vec![a.clone(), b.clone()]).unwrap();

        let bytes = list.to_bytes(KeyFormat::Hedera);
        // keyList (field 6) wrapping two keys (field 1) of 34 bytes each
        assert_eq!(&bytes[..2], &[0x32, 0x48]);
        assert_eq!(&bytes[2..4], &[0x0a, 0x22]);
        assert_eq!(&bytes[4..38], &a.to_bytes(KeyFormat::Protobuf)[..]);
        assert_eq!(&bytes[38..40], &[0x0a, 0x22]);
        assert_eq!(&bytes[40..], &b.to_bytes(KeyFormat::Protobuf)[..]);
    }

    #[test]
    fn test_threshold_key_bytes() {
        let a = endorsement_of(&ed25519_key(1));
        let b = endorsement_of(&ed25519_key(2));
        let one_of_two = Endorsement::threshold(1, vec![a, b]).unwrap();

        let bytes = one_of_two.to_bytes(KeyFormat::Mirror);
        // thresholdKey (field 5) { threshold = 1, keys (field 2) = KeyList }
        assert_eq!(&bytes[..6], &[0x2a, 0x4c, 0x08, 0x01, 0x12, 0x48]);
        assert_eq!(Endorsement::from_protobuf(&bytes).unwrap(), one_of_two);
    }

    #[test]
    fn test_contract_key_bytes() {
        let contract = Endorsement::contract(Address::new(0, 0, 1001)).unwrap();
        // contractID (field 1) { contractNum (field 3) = 1001 }
        assert_eq!(
            contract.to_bytes(KeyFormat::Protobuf),
            vec![0x0a, 0x03, 0x18, 0xe9, 0x07]
        );

        let evm = Endorsement::contract(Moniker::new(0, 0, &[0x11; 20]).unwrap()).unwrap();
        let bytes = evm.to_bytes(KeyFormat::Protobuf);
        assert_eq!(&bytes[..4], &[0x0a, 0x16, 0x22, 0x14]);
        assert_eq!(Endorsement::from_protobuf(&bytes).unwrap(), evm);
    }

    #[test]
    fn test_signature_map_bytes() {
        let map: SignatureMap = vec![SignaturePair::new(
            vec![1, 2],
            KeyType::Ed25519,
            vec![3; 64],
        )]
        .into_iter()
        .collect();

        let bytes = map.to_protobuf_bytes();
        assert_eq!(bytes.len(), 72);
        assert_eq!(&bytes[..8], &[0x0a, 0x46, 0x0a, 0x02, 0x01, 0x02, 0x1a, 0x40]);

        let ecdsa: SignatureMap = vec![SignaturePair::new(
            vec![],
            KeyType::EcdsaSecp256k1,
            vec![4; 64],
        )]
        .into_iter()
        .collect();
        // Empty prefix is omitted; ECDSA_secp256k1 signature is field 6
        assert_eq!(&ecdsa.to_protobuf_bytes()[..4], &[0x0a, 0x42, 0x32, 0x40]);
    }

    #[tokio::test]
    async fn test_signatures_survive_the_wire() {
        let keys = [ed25519_key(5), secp256k1_key(6)];
        let endorsement = Endorsement::list(keys.iter().map(endorsement_of).collect()).unwrap();
        let signatory = Signatory::composite(keys.iter().map(signatory_of).collect()).unwrap();
        let message = b"wire transfer";

        let map = signatory.sign_async(message).await.unwrap();
        let decoded = SignatureMap::from_protobuf_bytes(&map.to_protobuf_bytes()).unwrap();

        assert_eq!(decoded, map);
        assert!(decoded.satisfies(message, &endorsement));
    }
}
