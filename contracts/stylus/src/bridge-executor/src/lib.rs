#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

pub mod admin;
pub mod bridge;
pub mod codec;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod onchain;
pub mod registry;
pub mod types;
pub mod utils;
pub mod verifier;

pub use bridge::Bridge;
