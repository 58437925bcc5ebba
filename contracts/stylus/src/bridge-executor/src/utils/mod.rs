//! Shared utilities for the executor.
//!
//! These helpers are intentionally small and deterministic, as they run inside Stylus / WASM.

pub mod bytes;
