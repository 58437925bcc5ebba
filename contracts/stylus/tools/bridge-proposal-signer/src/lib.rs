//! Off-chain companion to the bridge executor: builds the calldata relayers submit, signs batches
//! the way the signing group does, and decodes failure payloads from `FailedHandlerExecution`.

pub mod encoder;
pub mod failure;
pub mod recovery;
pub mod types;

#[cfg(test)]
mod tests;

pub use encoder::{
    encode_packed_batch, execute_packed_proposals_calldata, execute_proposals_calldata,
    sign_and_verify, sign_batch, signer_address,
};
pub use failure::{decode_failure, FailureReason};
pub use recovery::LocalRecovery;
pub use types::{SignedBatch, SignerError};
