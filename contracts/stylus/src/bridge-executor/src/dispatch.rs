//! Per-proposal dispatch with failure isolation.
//!
//! Every handler call goes through [`HandlerInvoker`], which reports failure as a value. A failing
//! proposal becomes an [`ExecutionOutcome::Failed`]; the loop always moves on to the next one.

use alloc::vec::Vec;

use alloy_sol_types::{sol, SolError};
use stylus_sdk::alloy_primitives::{keccak256, Address, B256};

use crate::{
    errors::{BatchRejected, RegistryError},
    registry::{NonceRegistry, ResourceRegistry},
    types::{DepositNonce, DomainId, Proposal, ResourceId, SignerRecovery},
    verifier::{authorize_batch, BridgeConfig},
};

/// Upper bound on the failure payload carried by a failed outcome.
pub const MAX_LOW_LEVEL_DATA_LEN: usize = 1024;

sol! {
    /// Reason recorded when a proposal names a resource with no registered handler.
    error UnknownResource(bytes32 resourceID);
}

/// Trap boundary around handler execution.
pub trait HandlerInvoker {
    /// Apply `data` through `handler`. `Err` carries the raw failure payload (revert data).
    fn execute_proposal(
        &mut self,
        handler: Address,
        resource_id: ResourceId,
        data: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Executed {
        origin_domain_id: DomainId,
        deposit_nonce: DepositNonce,
        data_hash: B256,
    },
    Failed {
        origin_domain_id: DomainId,
        deposit_nonce: DepositNonce,
        low_level_data: Vec<u8>,
    },
}

impl ExecutionOutcome {
    pub fn deposit_key(&self) -> (DomainId, DepositNonce) {
        match self {
            ExecutionOutcome::Executed {
                origin_domain_id,
                deposit_nonce,
                ..
            }
            | ExecutionOutcome::Failed {
                origin_domain_id,
                deposit_nonce,
                ..
            } => (*origin_domain_id, *deposit_nonce),
        }
    }

    pub fn is_executed(&self) -> bool {
        matches!(self, ExecutionOutcome::Executed { .. })
    }
}

/// `keccak256(handler || data)`, packed.
pub fn data_hash(handler: Address, data: &[u8]) -> B256 {
    let mut buf = Vec::with_capacity(20 + data.len());
    buf.extend_from_slice(handler.as_slice());
    buf.extend_from_slice(data);
    keccak256(buf)
}

/// ABI-encoded `UnknownResource(resourceID)`, used as the failure payload.
pub fn unknown_resource_reason(resource_id: ResourceId) -> Vec<u8> {
    UnknownResource {
        resourceID: resource_id,
    }
    .abi_encode()
}

fn bounded(mut low_level_data: Vec<u8>) -> Vec<u8> {
    low_level_data.truncate(MAX_LOW_LEVEL_DATA_LEN);
    low_level_data
}

/// Run one already-authorized proposal. `None` means it was skipped as already executed.
pub fn execute_one<N, R, H>(
    nonces: &mut N,
    resources: &R,
    handlers: &mut H,
    proposal: &Proposal,
) -> Option<ExecutionOutcome>
where
    N: NonceRegistry,
    R: ResourceRegistry,
    H: HandlerInvoker,
{
    let (origin_domain_id, deposit_nonce) = proposal.deposit_key();
    if nonces.is_executed(origin_domain_id, deposit_nonce) {
        return None;
    }

    let entry = match resources.resolve(proposal.resource_id) {
        Ok(entry) => entry,
        Err(RegistryError::UnknownResource(resource_id)) => {
            return Some(ExecutionOutcome::Failed {
                origin_domain_id,
                deposit_nonce,
                low_level_data: unknown_resource_reason(resource_id),
            });
        }
    };

    match handlers.execute_proposal(entry.handler, proposal.resource_id, &proposal.data) {
        Ok(_response) => {
            nonces.mark_executed(origin_domain_id, deposit_nonce);
            Some(ExecutionOutcome::Executed {
                origin_domain_id,
                deposit_nonce,
                data_hash: data_hash(entry.handler, &proposal.data),
            })
        }
        Err(low_level_data) => Some(ExecutionOutcome::Failed {
            origin_domain_id,
            deposit_nonce,
            low_level_data: bounded(low_level_data),
        }),
    }
}

/// Run an already-authorized batch in submission order. Outcomes keep that order; skipped
/// proposals contribute nothing.
pub fn execute_many<N, R, H>(
    nonces: &mut N,
    resources: &R,
    handlers: &mut H,
    proposals: &[Proposal],
) -> Vec<ExecutionOutcome>
where
    N: NonceRegistry,
    R: ResourceRegistry,
    H: HandlerInvoker,
{
    proposals
        .iter()
        .filter_map(|proposal| execute_one(nonces, resources, handlers, proposal))
        .collect()
}

/// Authorize `proposals` against `signature`, then run them.
///
/// A rejection returns before any registry is touched.
pub fn execute_signed_batch<S, N, R, H>(
    config: &BridgeConfig,
    recovery: &S,
    nonces: &mut N,
    resources: &R,
    handlers: &mut H,
    proposals: &[Proposal],
    signature: &[u8],
) -> Result<Vec<ExecutionOutcome>, BatchRejected>
where
    S: SignerRecovery,
    N: NonceRegistry,
    R: ResourceRegistry,
    H: HandlerInvoker,
{
    authorize_batch(config, recovery, proposals, signature)?;
    Ok(execute_many(nonces, resources, handlers, proposals))
}

/// Single-proposal form of [`execute_signed_batch`]; the signature covers a batch of one.
pub fn execute_signed_proposal<S, N, R, H>(
    config: &BridgeConfig,
    recovery: &S,
    nonces: &mut N,
    resources: &R,
    handlers: &mut H,
    proposal: &Proposal,
    signature: &[u8],
) -> Result<Option<ExecutionOutcome>, BatchRejected>
where
    S: SignerRecovery,
    N: NonceRegistry,
    R: ResourceRegistry,
    H: HandlerInvoker,
{
    authorize_batch(config, recovery, core::slice::from_ref(proposal), signature)?;
    Ok(execute_one(nonces, resources, handlers, proposal))
}
