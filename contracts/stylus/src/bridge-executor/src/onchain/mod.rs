//! Stylus-specific implementations of the executor seams: storage, `ecrecover` and raw calls.

pub mod crypto;
pub mod handler;
pub mod interfaces;
pub mod storage;

pub use crypto::PrecompileRecovery;
pub use handler::RawCallInvoker;
pub use storage::{NonceStore, ResourceStore};
