use alloy_primitives::Address;
use bridge_proposal_types::{BridgeDomain, Proposal, RecoveryError};

/// A batch together with the signature the bridge at `domain` will accept for it.
#[derive(Clone, Debug)]
pub struct SignedBatch {
    pub domain: BridgeDomain,
    pub proposals: Vec<Proposal>,
    /// `r || s || v` with `v` in {27, 28}.
    pub signature: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("ecdsa: {0}")]
    Ecdsa(#[from] k256::ecdsa::Error),

    #[error("recovery failed: {0:?}")]
    Recovery(RecoveryError),

    #[error("batch of {0} proposals exceeds the packed limit")]
    BatchTooLarge(usize),

    #[error("proposal data of {0} bytes does not fit a u32 length prefix")]
    DataTooLarge(usize),

    #[error("recovered {recovered}, expected {expected}")]
    SignerMismatch { recovered: Address, expected: Address },
}

impl From<RecoveryError> for SignerError {
    fn from(err: RecoveryError) -> Self {
        SignerError::Recovery(err)
    }
}
