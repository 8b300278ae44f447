//! Core types and data structures for the wealth ledger

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Live exchange rates keyed by currency code, expressed as units of that
/// currency per one unit of the main currency. Fetched fresh per operation
/// and never persisted.
pub type RateTable = HashMap<String, f64>;

/// A user's wealth record: one balance per currency
///
/// The set of currency keys is fixed at account creation from the rate
/// provider's currency set plus the main currency. Balances are exact
/// decimals and never go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthRecord {
    /// Unique identifier of the owning user
    pub user_id: u64,
    /// Balance per currency code
    pub balances: HashMap<String, BigDecimal>,
    /// When the record was created
    pub created_at: NaiveDateTime,
    /// When the record was last updated
    pub updated_at: NaiveDateTime,
}

impl WealthRecord {
    /// Create a record with a zero balance for every given currency code
    pub fn new<I>(user_id: u64, currencies: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let now = chrono::Utc::now().naive_utc();
        let balances = currencies
            .into_iter()
            .map(|code| (code, BigDecimal::zero()))
            .collect();
        Self {
            user_id,
            balances,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record holds a balance for the given currency
    pub fn has_currency(&self, currency: &str) -> bool {
        self.balances.contains_key(currency)
    }

    /// Get the balance for a currency, or `InvalidCurrency` if the code is
    /// not part of this record
    pub fn balance(&self, currency: &str) -> WealthResult<&BigDecimal> {
        self.balances
            .get(currency)
            .ok_or_else(|| WealthError::InvalidCurrency(currency.to_string()))
    }

    /// Add `amount` to the balance of `currency`, inserting a fresh balance
    /// if the currency is not present yet
    pub fn credit(&mut self, currency: &str, amount: &BigDecimal) {
        let balance = self
            .balances
            .entry(currency.to_string())
            .or_insert_with(BigDecimal::zero);
        *balance += amount;
        self.updated_at = chrono::Utc::now().naive_utc();
    }

    /// Subtract `amount` from the balance of `currency`
    ///
    /// Fails with `InsufficientFunds` when `amount` strictly exceeds the
    /// current balance; debiting the full balance down to zero is allowed.
    pub fn debit(&mut self, currency: &str, amount: &BigDecimal) -> WealthResult<()> {
        let current = self.balance(currency)?;
        if amount > current {
            return Err(WealthError::InsufficientFunds(currency.to_string()));
        }
        let balance = self
            .balances
            .get_mut(currency)
            .ok_or_else(|| WealthError::InvalidCurrency(currency.to_string()))?;
        *balance -= amount;
        self.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }
}

/// Errors that can occur in the wealth ledger
#[derive(Debug, thiserror::Error)]
pub enum WealthError {
    #[error("account not found for user {0}")]
    AccountNotFound(u64),
    #[error("account already exists for user {0}")]
    DuplicateAccount(u64),
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("amount must be positive, got {0}")]
    InvalidAmount(BigDecimal),
    #[error("insufficient funds in {0}")]
    InsufficientFunds(String),
    #[error("no exchange rates available")]
    RateUnavailable,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("rate provider error: {0}")]
    Provider(String),
}

/// Result type for ledger operations
pub type WealthResult<T> = Result<T, WealthError>;
