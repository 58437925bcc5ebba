//! Solidity ABI of the external handler contracts the executor dispatches to.

use alloy_sol_types::sol;

sol! {
    interface IDepositHandler {
        /// Apply a proposal's effect. Reverts on failure.
        function executeProposal(bytes32 resourceID, bytes calldata data) external returns (bytes memory);
    }
}
