use core::fmt;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{sol, Panic, Revert, SolError};

sol! {
    error UnknownResource(bytes32 resourceID);
    error HandlerNotDeployed(address handler);
    error MalformedHandlerReturn(address handler);
}

/// Decoded `lowLevelData` from a `FailedHandlerExecution` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Handler reverted without data (bare `revert()`, out of gas, non-contract target).
    Empty,
    /// `Error(string)`.
    Revert(String),
    /// `Panic(uint256)`.
    Panic(U256),
    /// No handler was registered for the resource.
    UnknownResource(B256),
    /// The registered handler address has no code.
    HandlerNotDeployed(Address),
    /// The handler returned something other than ABI-encoded `bytes`.
    MalformedHandlerReturn(Address),
    /// Custom error or data cut at the 1024-byte cap.
    Raw(Vec<u8>),
}

pub fn decode_failure(data: &[u8]) -> FailureReason {
    if data.is_empty() {
        return FailureReason::Empty;
    }
    if let Ok(revert) = Revert::abi_decode(data, true) {
        return FailureReason::Revert(revert.reason);
    }
    if let Ok(panic) = Panic::abi_decode(data, true) {
        return FailureReason::Panic(panic.code);
    }
    if let Ok(unknown) = UnknownResource::abi_decode(data, true) {
        return FailureReason::UnknownResource(unknown.resourceID);
    }
    if let Ok(missing) = HandlerNotDeployed::abi_decode(data, true) {
        return FailureReason::HandlerNotDeployed(missing.handler);
    }
    if let Ok(malformed) = MalformedHandlerReturn::abi_decode(data, true) {
        return FailureReason::MalformedHandlerReturn(malformed.handler);
    }
    FailureReason::Raw(data.to_vec())
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Empty => write!(f, "reverted without data"),
            FailureReason::Revert(reason) => write!(f, "reverted: {reason}"),
            FailureReason::Panic(code) => write!(f, "panic {code:#x}"),
            FailureReason::UnknownResource(id) => write!(f, "unknown resource {id}"),
            FailureReason::HandlerNotDeployed(handler) => {
                write!(f, "no contract at handler {handler}")
            }
            FailureReason::MalformedHandlerReturn(handler) => {
                write!(f, "handler {handler} returned malformed data")
            }
            FailureReason::Raw(data) => {
                write!(f, "custom error (")?;
                for b in data {
                    write!(f, "{b:02x}")?;
                }
                write!(f, ")")
            }
        }
    }
}
