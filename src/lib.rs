//! # Wealth Core
//!
//! A per-user multi-currency wallet ledger: accounts are seeded from live
//! exchange rates, currencies are bought and sold against a main anchor
//! currency, and individual balances can be credited or debited directly.
//!
//! ## Features
//!
//! - **Exact balances**: every amount is a [`bigdecimal::BigDecimal`];
//!   exchange conversions round half-up at a fixed scale and survive
//!   save/load without drift
//! - **Pluggable storage**: the ledger depends only on the [`LedgerStore`]
//!   trait; an in-memory store ships for testing and development
//! - **Pluggable rates**: the [`RateProvider`] trait abstracts the rate
//!   source, with an HTTP implementation against an exchange-rates JSON API
//!   and a fixed table for offline use
//! - **Per-account serialization**: concurrent operations on the same user
//!   cannot lose updates; different users proceed in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use wealth_core::{FixedRateProvider, MemoryStore, WealthLedger};
//! use bigdecimal::BigDecimal;
//!
//! # async fn run() -> wealth_core::WealthResult<()> {
//! let store = MemoryStore::new();
//! let provider = FixedRateProvider::new([("USD".to_string(), 30.0)]);
//! let ledger = WealthLedger::new(store, provider);
//!
//! ledger.create_account(1).await?;
//! let record = ledger.exchange(1, "USD", BigDecimal::from(300), true).await?;
//! assert_eq!(record.balance("USD")?, &BigDecimal::from(300));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod rates;
pub mod store;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::LedgerConfig;
pub use ledger::*;
pub use rates::*;
pub use store::*;
pub use traits::*;
pub use types::*;
