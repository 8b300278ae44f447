//! Ledger module containing the wealth orchestrator

pub mod core;

pub use core::*;
