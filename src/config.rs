//! Ledger policy configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Policy constants for a [`WealthLedger`](crate::WealthLedger)
///
/// The defaults mirror the classic composition: TRY as the anchor currency,
/// a 130000 TRY seed for new accounts, and exchange conversions rounded to
/// 9 fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The anchor currency all exchange rates and the seed balance are
    /// denominated against
    pub main_currency: String,
    /// Amount credited to the main currency when an account is created
    pub initial_balance: BigDecimal,
    /// Fractional digits kept when converting an amount to its
    /// main-currency equivalent (round half-up)
    pub rate_scale: i64,
}

impl LedgerConfig {
    /// Create a config with the given main currency and seed balance,
    /// keeping the default rounding scale
    pub fn new(main_currency: impl Into<String>, initial_balance: BigDecimal) -> Self {
        Self {
            main_currency: main_currency.into(),
            initial_balance,
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            main_currency: "TRY".to_string(),
            initial_balance: BigDecimal::from(130000),
            rate_scale: 9,
        }
    }
}
