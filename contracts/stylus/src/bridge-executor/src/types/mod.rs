//! Shared proposal types, re-exported for the executor modules.

pub use bridge_proposal_types::{
    digest::{proposals_digest, BridgeDomain},
    proposal::{
        DepositNonce, DomainId, Proposal, ResourceId, MAX_PACKED_PROPOSALS, PACKED_HEADER_LEN,
    },
    recovery::{split_signature, SignerRecovery},
};
