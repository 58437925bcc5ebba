use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use bridge_proposal_types::{
    proposals_digest, BridgeDomain, Proposal, SignerRecovery, PACKED_HEADER_LEN,
};
use k256::ecdsa::SigningKey;

use crate::recovery::{address_of, LocalRecovery};
use crate::types::{SignedBatch, SignerError};

pub use bridge_proposal_types::MAX_PACKED_PROPOSALS;

sol! {
    struct WireProposal {
        uint8 originDomainID;
        uint64 depositNonce;
        bytes32 resourceID;
        bytes data;
    }

    interface IBridge {
        function executeProposal(WireProposal proposal, bytes signature) external;
        function executeProposals(WireProposal[] proposals, bytes signature) external;
        function executePackedProposals(bytes batch, bytes signature) external;
    }
}

impl From<&Proposal> for WireProposal {
    fn from(p: &Proposal) -> Self {
        WireProposal {
            originDomainID: p.origin_domain_id,
            depositNonce: p.deposit_nonce,
            resourceID: p.resource_id,
            data: Bytes::copy_from_slice(&p.data),
        }
    }
}

/// Packed batch: per proposal `u8 origin || u64 nonce || bytes32 resource || u32 len || data`,
/// integers big-endian, no padding.
///
/// Limits are not checked here; see [`execute_packed_proposals_calldata`].
pub fn encode_packed_batch(proposals: &[Proposal]) -> Vec<u8> {
    let body: usize = proposals.iter().map(|p| PACKED_HEADER_LEN + p.data.len()).sum();
    let mut buf = Vec::with_capacity(body);
    for p in proposals {
        buf.push(p.origin_domain_id);
        buf.extend_from_slice(&p.deposit_nonce.to_be_bytes());
        buf.extend_from_slice(p.resource_id.as_slice());
        buf.extend_from_slice(&(p.data.len() as u32).to_be_bytes());
        buf.extend_from_slice(&p.data);
    }
    buf
}

/// Calldata for `executeProposals(proposals, signature)`.
pub fn execute_proposals_calldata(batch: &SignedBatch) -> Vec<u8> {
    IBridge::executeProposalsCall {
        proposals: batch.proposals.iter().map(WireProposal::from).collect(),
        signature: Bytes::copy_from_slice(&batch.signature),
    }
    .abi_encode()
}

/// Calldata for `executePackedProposals(batch, signature)`.
pub fn execute_packed_proposals_calldata(batch: &SignedBatch) -> Result<Vec<u8>, SignerError> {
    if batch.proposals.len() > MAX_PACKED_PROPOSALS {
        return Err(SignerError::BatchTooLarge(batch.proposals.len()));
    }
    if let Some(p) = batch
        .proposals
        .iter()
        .find(|p| u32::try_from(p.data.len()).is_err())
    {
        return Err(SignerError::DataTooLarge(p.data.len()));
    }

    Ok(IBridge::executePackedProposalsCall {
        batch: encode_packed_batch(&batch.proposals).into(),
        signature: Bytes::copy_from_slice(&batch.signature),
    }
    .abi_encode())
}

/// Sign the batch digest for `domain`. Returns `r || s || v` with low `s` and `v` in {27, 28}.
pub fn sign_batch(
    domain: &BridgeDomain,
    proposals: &[Proposal],
    signing_key: &SigningKey,
) -> Result<Vec<u8>, SignerError> {
    let digest = proposals_digest(domain, proposals);
    let (signature, recid) = signing_key.sign_prehash_recoverable(digest.as_slice())?;

    let mut sig_bytes = Vec::with_capacity(65);
    sig_bytes.extend_from_slice(&signature.to_bytes());
    sig_bytes.push(27 + recid.to_byte());
    Ok(sig_bytes)
}

/// Sign and self-check: the signature must recover to the key's own address.
pub fn sign_and_verify(
    domain: BridgeDomain,
    proposals: Vec<Proposal>,
    signing_key: &SigningKey,
) -> Result<SignedBatch, SignerError> {
    let signature = sign_batch(&domain, &proposals, signing_key)?;
    let expected = signer_address(signing_key);
    let recovered = LocalRecovery.recover(proposals_digest(&domain, &proposals), &signature)?;
    if recovered != expected {
        return Err(SignerError::SignerMismatch {
            recovered,
            expected,
        });
    }
    Ok(SignedBatch {
        domain,
        proposals,
        signature,
    })
}

pub fn signer_address(signing_key: &SigningKey) -> Address {
    address_of(signing_key.verifying_key())
}
