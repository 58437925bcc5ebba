#[cfg(test)]
mod tests {
    use crate::encoder::{
        encode_packed_batch, execute_packed_proposals_calldata, execute_proposals_calldata,
        sign_and_verify, sign_batch, signer_address, IBridge, MAX_PACKED_PROPOSALS,
    };
    use crate::failure::{
        decode_failure, FailureReason, HandlerNotDeployed, MalformedHandlerReturn,
        UnknownResource,
    };
    use crate::recovery::LocalRecovery;
    use crate::types::{SignedBatch, SignerError};
    use alloy_primitives::{Address, FixedBytes, U256};
    use alloy_sol_types::{Panic, Revert, SolCall, SolError};
    use bridge_proposal_types::{
        proposals_digest, recovery::SECP256K1N_HALF, BridgeDomain, Proposal, RecoveryError,
        SignerRecovery, PACKED_HEADER_LEN,
    };
    use k256::ecdsa::SigningKey;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_bytes(&[byte; 32].into()).unwrap()
    }

    fn domain() -> BridgeDomain {
        BridgeDomain::new(42161, Address::repeat_byte(0xb1))
    }

    fn batch() -> Vec<Proposal> {
        vec![
            Proposal::new(1, 7, FixedBytes::repeat_byte(0x11), vec![0xaa, 0xbb]),
            Proposal::new(2, 300, FixedBytes::repeat_byte(0x22), Vec::new()),
        ]
    }

    #[test]
    fn test_packed_layout() {
        let packed = encode_packed_batch(&batch());
        assert_eq!(PACKED_HEADER_LEN, 45);
        assert_eq!(packed.len(), PACKED_HEADER_LEN + 2 + PACKED_HEADER_LEN);

        assert_eq!(packed[0], 1);
        assert_eq!(&packed[1..9], &7u64.to_be_bytes());
        assert_eq!(&packed[9..41], &[0x11; 32]);
        assert_eq!(&packed[41..45], &2u32.to_be_bytes());
        assert_eq!(&packed[45..47], &[0xaa, 0xbb]);
        assert_eq!(packed[47], 2);
        assert_eq!(&packed[48..56], &300u64.to_be_bytes());
        assert_eq!(&packed[88..92], &0u32.to_be_bytes());
    }

    #[test]
    fn test_sign_batch_recovers_signer() {
        let mpc = key(7);
        let proposals = batch();
        let signature = sign_batch(&domain(), &proposals, &mpc).unwrap();

        assert_eq!(signature.len(), 65);
        assert!(signature[64] == 27 || signature[64] == 28);
        assert!(U256::from_be_slice(&signature[32..64]) <= SECP256K1N_HALF);

        let digest = proposals_digest(&domain(), &proposals);
        assert_eq!(
            LocalRecovery.recover(digest, &signature).unwrap(),
            signer_address(&mpc)
        );
    }

    #[test]
    fn test_recovery_accepts_zero_based_v() {
        let mpc = key(7);
        let proposals = batch();
        let mut signature = sign_batch(&domain(), &proposals, &mpc).unwrap();
        signature[64] -= 27;

        let digest = proposals_digest(&domain(), &proposals);
        assert_eq!(
            LocalRecovery.recover(digest, &signature).unwrap(),
            signer_address(&mpc)
        );
    }

    #[test]
    fn test_recovery_rejects_bad_signatures() {
        let digest = proposals_digest(&domain(), &batch());
        assert_eq!(
            LocalRecovery.recover(digest, &[0u8; 64]),
            Err(RecoveryError::InvalidLength(64))
        );

        let mut signature = sign_batch(&domain(), &batch(), &key(7)).unwrap();
        signature[64] = 29;
        assert_eq!(
            LocalRecovery.recover(digest, &signature),
            Err(RecoveryError::InvalidRecoveryId(29))
        );

        let mut high_s = sign_batch(&domain(), &batch(), &key(7)).unwrap();
        high_s[32..64].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            LocalRecovery.recover(digest, &high_s),
            Err(RecoveryError::MalleableSignature)
        );
    }

    #[test]
    fn test_signer_address_known_vector() {
        // Private key 0x...01 maps to the well-known generator-point address.
        let mut one = [0u8; 32];
        one[31] = 1;
        let sk = SigningKey::from_bytes(&one.into()).unwrap();
        assert_eq!(
            signer_address(&sk),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let signed = sign_and_verify(domain(), batch(), &key(9)).unwrap();
        assert_eq!(signed.proposals, batch());
        assert_eq!(signed.domain, domain());
    }

    #[test]
    fn test_execute_proposals_calldata_roundtrips_abi() {
        let signed = sign_and_verify(domain(), batch(), &key(9)).unwrap();
        let calldata = execute_proposals_calldata(&signed);
        assert_eq!(&calldata[..4], &IBridge::executeProposalsCall::SELECTOR);

        let call = IBridge::executeProposalsCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(call.proposals.len(), 2);
        assert_eq!(call.proposals[1].depositNonce, 300);
        assert_eq!(&call.signature[..], signed.signature.as_slice());
    }

    #[test]
    fn test_packed_calldata_limits() {
        let signed = SignedBatch {
            domain: domain(),
            proposals: vec![
                Proposal::new(1, 1, FixedBytes::ZERO, Vec::new());
                MAX_PACKED_PROPOSALS + 1
            ],
            signature: vec![0u8; 65],
        };
        assert!(matches!(
            execute_packed_proposals_calldata(&signed),
            Err(SignerError::BatchTooLarge(n)) if n == MAX_PACKED_PROPOSALS + 1
        ));

        let ok = SignedBatch {
            proposals: batch(),
            ..signed
        };
        let calldata = execute_packed_proposals_calldata(&ok).unwrap();
        let call = IBridge::executePackedProposalsCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(&call.batch[..], encode_packed_batch(&batch()).as_slice());
    }

    #[test]
    fn test_decode_failure() {
        assert_eq!(decode_failure(&[]), FailureReason::Empty);

        let revert = Revert {
            reason: "insufficient liquidity".into(),
        }
        .abi_encode();
        assert_eq!(
            decode_failure(&revert),
            FailureReason::Revert("insufficient liquidity".into())
        );

        let panic = Panic { code: U256::from(0x11) }.abi_encode();
        assert_eq!(decode_failure(&panic), FailureReason::Panic(U256::from(0x11)));

        let id = FixedBytes::repeat_byte(0x33);
        let unknown = UnknownResource { resourceID: id }.abi_encode();
        assert_eq!(decode_failure(&unknown), FailureReason::UnknownResource(id));

        let custom = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(decode_failure(&custom), FailureReason::Raw(custom.clone()));
        assert_eq!(decode_failure(&custom).to_string(), "custom error (deadbeef)");
    }

    #[test]
    fn test_decode_handler_failures() {
        let handler = Address::repeat_byte(0x4a);

        let missing = HandlerNotDeployed { handler }.abi_encode();
        assert_eq!(
            decode_failure(&missing),
            FailureReason::HandlerNotDeployed(handler)
        );

        let malformed = MalformedHandlerReturn { handler }.abi_encode();
        assert_eq!(
            decode_failure(&malformed),
            FailureReason::MalformedHandlerReturn(handler)
        );
        assert!(decode_failure(&malformed).to_string().contains("malformed"));
    }
}
