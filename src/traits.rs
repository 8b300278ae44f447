//! Traits for the ledger's collaborator seams
//!
//! The ledger core depends only on these traits; storage technology and the
//! concrete exchange-rate source are composition-time decisions.

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for wealth records
///
/// Implementations must be safe for concurrent use across different users;
/// the ledger itself serializes operations on the same user. Only
/// single-record atomicity is required of `save`.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Look up a record by user id
    async fn find_by_id(&self, user_id: u64) -> WealthResult<Option<WealthRecord>>;

    /// Persist a record, inserting or replacing the stored copy
    async fn save(&self, record: &WealthRecord) -> WealthResult<()>;
}

/// Source of live exchange rates, base-normalized to the main currency
///
/// A provider that obtained no usable rate data must fail with
/// [`WealthError::RateUnavailable`] rather than return an empty table;
/// transport or decoding failures map to [`WealthError::Provider`].
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the current rate table
    async fn get_rates(&self) -> WealthResult<RateTable>;
}
