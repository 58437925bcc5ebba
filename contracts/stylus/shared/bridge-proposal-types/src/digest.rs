//! EIP-712 digest over an ordered batch of proposals.
//!
//! The same code computes the digest in the contract (before `ecrecover`) and in the off-chain
//! signer, so both sides agree byte-for-byte.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::proposal::Proposal;

pub const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
pub const DOMAIN_NAME: &[u8] = b"Bridge";
pub const DOMAIN_VERSION: &[u8] = b"3.1.0";

pub const PROPOSAL_TYPE: &[u8] =
    b"Proposal(uint8 originDomainID,uint64 depositNonce,bytes32 resourceID,bytes data)";
pub const PROPOSALS_TYPE: &[u8] = b"Proposals(Proposal[] proposals)Proposal(uint8 originDomainID,uint64 depositNonce,bytes32 resourceID,bytes data)";

/// Identity of one bridge deployment; part of every signed digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeDomain {
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl BridgeDomain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    /// `keccak256(abi.encode(DOMAIN_TYPEHASH, keccak256(name), keccak256(version), chainId, verifyingContract))`
    pub fn separator(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 * 5);
        buf.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
        buf.extend_from_slice(keccak256(DOMAIN_NAME).as_slice());
        buf.extend_from_slice(keccak256(DOMAIN_VERSION).as_slice());
        buf.extend_from_slice(&U256::from(self.chain_id).to_be_bytes::<32>());
        buf.extend_from_slice(&address_word(self.verifying_contract));
        keccak256(buf)
    }
}

/// Struct hash of a single proposal. `data` enters through its keccak256, as EIP-712 requires for
/// dynamic `bytes`.
pub fn proposal_struct_hash(proposal: &Proposal) -> B256 {
    let mut buf = Vec::with_capacity(32 * 5);
    buf.extend_from_slice(keccak256(PROPOSAL_TYPE).as_slice());
    buf.extend_from_slice(&u64_word(proposal.origin_domain_id as u64));
    buf.extend_from_slice(&u64_word(proposal.deposit_nonce));
    buf.extend_from_slice(proposal.resource_id.as_slice());
    buf.extend_from_slice(keccak256(&proposal.data).as_slice());
    keccak256(buf)
}

/// Struct hash of the whole batch; order-sensitive.
pub fn proposals_struct_hash(proposals: &[Proposal]) -> B256 {
    let mut packed = Vec::with_capacity(32 * proposals.len());
    for proposal in proposals {
        packed.extend_from_slice(proposal_struct_hash(proposal).as_slice());
    }

    let mut buf = Vec::with_capacity(32 * 2);
    buf.extend_from_slice(keccak256(PROPOSALS_TYPE).as_slice());
    buf.extend_from_slice(keccak256(packed).as_slice());
    keccak256(buf)
}

/// Final digest: `keccak256("\x19\x01" || domainSeparator || structHash)`.
pub fn proposals_digest(domain: &BridgeDomain, proposals: &[Proposal]) -> B256 {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(b"\x19\x01");
    buf.extend_from_slice(domain.separator().as_slice());
    buf.extend_from_slice(proposals_struct_hash(proposals).as_slice());
    keccak256(buf)
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use alloy_primitives::FixedBytes;

    use super::*;

    fn batch() -> Vec<Proposal> {
        vec![
            Proposal::new(1, 1, FixedBytes::repeat_byte(0x11), vec![0xaa, 0xbb]),
            Proposal::new(1, 2, FixedBytes::repeat_byte(0x22), vec![]),
        ]
    }

    #[test]
    fn digest_binds_order() {
        let domain = BridgeDomain::new(1, Address::repeat_byte(0x42));
        let proposals = batch();
        let mut reversed = proposals.clone();
        reversed.reverse();

        assert_ne!(
            proposals_digest(&domain, &proposals),
            proposals_digest(&domain, &reversed)
        );
    }

    #[test]
    fn digest_binds_subset() {
        let domain = BridgeDomain::new(1, Address::repeat_byte(0x42));
        let proposals = batch();

        assert_ne!(
            proposals_digest(&domain, &proposals),
            proposals_digest(&domain, &proposals[..1])
        );
    }

    #[test]
    fn digest_binds_deployment() {
        let proposals = batch();
        let here = BridgeDomain::new(1, Address::repeat_byte(0x42));
        let other_contract = BridgeDomain::new(1, Address::repeat_byte(0x43));
        let other_chain = BridgeDomain::new(2, Address::repeat_byte(0x42));

        let digest = proposals_digest(&here, &proposals);
        assert_ne!(digest, proposals_digest(&other_contract, &proposals));
        assert_ne!(digest, proposals_digest(&other_chain, &proposals));
    }

    #[test]
    fn digest_binds_data() {
        let domain = BridgeDomain::new(1, Address::repeat_byte(0x42));
        let proposals = batch();
        let mut tampered = proposals.clone();
        tampered[0].data.push(0x00);

        assert_ne!(
            proposals_digest(&domain, &proposals),
            proposals_digest(&domain, &tampered)
        );
    }

    #[test]
    fn type_strings_match_solidity() {
        // Nested type strings append the referenced struct after the primary one.
        assert!(PROPOSALS_TYPE.ends_with(PROPOSAL_TYPE));
    }
}
