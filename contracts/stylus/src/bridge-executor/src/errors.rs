use stylus_sdk::alloy_primitives::Address;

use crate::types::ResourceId;

/// Errors during packed batch decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Truncated,
    TooManyProposals,
}

/// Errors during signer recovery.
pub use bridge_proposal_types::RecoveryError;

/// Errors during resource resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    UnknownResource(ResourceId),
}

/// Errors from the authorized-signer lifecycle (keygen / rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerError {
    AlreadySet,
    NotSet,
    ZeroAddress,
}

/// Admin-surface refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminError {
    AlreadyInitialized,
    NotInitialized,
    Unauthorized(Address),
    ZeroAddress,
}

/// Reasons a whole batch is refused. Always raised before any nonce is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRejected {
    Paused,
    SignerNotSet,
    EmptyBatch,
    InvalidSignature(RecoveryError),
    SignerMismatch { recovered: Address },
    Malformed(DecodeError),
}

impl From<DecodeError> for BatchRejected {
    fn from(err: DecodeError) -> Self {
        BatchRejected::Malformed(err)
    }
}

impl From<RecoveryError> for BatchRejected {
    fn from(err: RecoveryError) -> Self {
        BatchRejected::InvalidSignature(err)
    }
}
