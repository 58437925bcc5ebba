//! Handler invocation through a raw `call`, capturing revert data instead of propagating it.

use alloc::vec::Vec;

use alloy_sol_types::{sol, SolCall, SolError};
use stylus_sdk::{alloy_primitives::Address, call::RawCall, stylus_core::Host};

use crate::{dispatch::HandlerInvoker, onchain::interfaces::IDepositHandler, types::ResourceId};

sol! {
    /// The handler address holds no code; a `call` to it would succeed without doing anything.
    error HandlerNotDeployed(address handler);
    /// The handler returned data that is not an ABI-encoded `bytes`.
    error MalformedHandlerReturn(address handler);
}

/// Dispatches to handler contracts through the host.
pub struct RawCallInvoker<'a> {
    host: &'a dyn Host,
}

impl<'a> RawCallInvoker<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self { host }
    }
}

/// Turn a raw call result into a handler result.
///
/// Success requires code at `handler` and a reply that decodes as `executeProposal`'s return.
/// Anything else is a failure with an ABI-encoded reason.
pub fn check_handler_reply(
    handler: Address,
    code_size: usize,
    reply: Result<Vec<u8>, Vec<u8>>,
) -> Result<Vec<u8>, Vec<u8>> {
    if code_size == 0 {
        return Err(HandlerNotDeployed { handler }.abi_encode());
    }
    let response = reply?;
    if IDepositHandler::executeProposalCall::abi_decode_returns(&response, true).is_err() {
        return Err(MalformedHandlerReturn { handler }.abi_encode());
    }
    Ok(response)
}

impl HandlerInvoker for RawCallInvoker<'_> {
    fn execute_proposal(
        &mut self,
        handler: Address,
        resource_id: ResourceId,
        data: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>> {
        let code_size = self.host.code_size(handler);
        if code_size == 0 {
            return check_handler_reply(handler, code_size, Ok(Vec::new()));
        }

        let calldata = IDepositHandler::executeProposalCall {
            resourceID: resource_id,
            data: data.to_vec().into(),
        }
        .abi_encode();

        // A revert inside the handler (or anything it calls) comes back as `Err(revert_data)`.
        let reply = unsafe { RawCall::new().call(handler, &calldata) };
        check_handler_reply(handler, code_size, reply)
    }
}
