//! Shared types for bridge proposals, the batch digest and signer recovery (on-chain/off-chain).

#![no_std]

extern crate alloc;

pub mod digest;
pub mod proposal;
pub mod recovery;

pub use digest::{proposals_digest, BridgeDomain};
pub use proposal::{
    DepositNonce, DomainId, Proposal, ResourceId, MAX_PACKED_PROPOSALS, PACKED_HEADER_LEN,
};
pub use recovery::{RecoveryError, SignerRecovery};
