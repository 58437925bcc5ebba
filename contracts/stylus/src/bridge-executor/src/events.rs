//! Events emitted by the entrypoint.

use alloy_sol_types::sol;

use crate::dispatch::ExecutionOutcome;

sol! {
    event ProposalExecution(uint8 originDomainID, uint64 depositNonce, bytes32 dataHash);
    event FailedHandlerExecution(uint8 originDomainID, uint64 depositNonce, bytes lowLevelData);

    event KeygenCompleted(address signer);
    event SignerRotated(address previous, address current);
    event KeyRefresh(string hash);
    event Retry(string txHash);
    event Paused(address account);
    event Unpaused(address account);
    event ResourceRegistered(bytes32 indexed resourceID, address handler, address target);
    event AdminChanged(address previous, address current);
}

/// The event recording one proposal's outcome.
pub enum OutcomeEvent {
    Executed(ProposalExecution),
    Failed(FailedHandlerExecution),
}

pub fn outcome_event(outcome: ExecutionOutcome) -> OutcomeEvent {
    match outcome {
        ExecutionOutcome::Executed {
            origin_domain_id,
            deposit_nonce,
            data_hash,
        } => OutcomeEvent::Executed(ProposalExecution {
            originDomainID: origin_domain_id,
            depositNonce: deposit_nonce,
            dataHash: data_hash,
        }),
        ExecutionOutcome::Failed {
            origin_domain_id,
            deposit_nonce,
            low_level_data,
        } => OutcomeEvent::Failed(FailedHandlerExecution {
            originDomainID: origin_domain_id,
            depositNonce: deposit_nonce,
            lowLevelData: low_level_data.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use alloy_sol_types::SolEvent;
    use stylus_sdk::alloy_primitives::{keccak256, B256};

    use super::*;

    #[test]
    fn executed_outcome_becomes_proposal_execution() {
        let hash = B256::repeat_byte(0x3c);
        let event = outcome_event(ExecutionOutcome::Executed {
            origin_domain_id: 2,
            deposit_nonce: 77,
            data_hash: hash,
        });

        match event {
            OutcomeEvent::Executed(e) => {
                assert_eq!(e.originDomainID, 2);
                assert_eq!(e.depositNonce, 77);
                assert_eq!(e.dataHash, hash);
            }
            OutcomeEvent::Failed(_) => panic!("expected ProposalExecution"),
        }
    }

    #[test]
    fn failed_outcome_carries_low_level_data() {
        let event = outcome_event(ExecutionOutcome::Failed {
            origin_domain_id: 1,
            deposit_nonce: 5,
            low_level_data: vec![0x08, 0xc3, 0x79, 0xa0],
        });

        match event {
            OutcomeEvent::Failed(e) => {
                assert_eq!(e.originDomainID, 1);
                assert_eq!(e.depositNonce, 5);
                assert_eq!(e.lowLevelData.to_vec(), vec![0x08, 0xc3, 0x79, 0xa0]);
            }
            OutcomeEvent::Executed(_) => panic!("expected FailedHandlerExecution"),
        }
    }

    #[test]
    fn outcome_event_signatures() {
        assert_eq!(
            ProposalExecution::SIGNATURE_HASH,
            keccak256("ProposalExecution(uint8,uint64,bytes32)")
        );
        assert_eq!(
            FailedHandlerExecution::SIGNATURE_HASH,
            keccak256("FailedHandlerExecution(uint8,uint64,bytes)")
        );
    }
}
