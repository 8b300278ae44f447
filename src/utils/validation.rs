//! Validation utilities

use bigdecimal::{BigDecimal, Zero};

use crate::types::{WealthError, WealthResult};

/// Validate that an amount is strictly positive
///
/// Zero is rejected: crediting or exchanging nothing is a caller mistake,
/// not a no-op.
pub fn validate_positive_amount(amount: &BigDecimal) -> WealthResult<()> {
    if *amount <= BigDecimal::zero() {
        Err(WealthError::InvalidAmount(amount.clone()))
    } else {
        Ok(())
    }
}

/// Validate the shape of a currency code (uppercase ASCII letters, at most
/// ten characters)
pub fn validate_currency_code(code: &str) -> WealthResult<()> {
    let well_formed = !code.is_empty()
        && code.len() <= 10
        && code.chars().all(|c| c.is_ascii_uppercase());
    if well_formed {
        Ok(())
    } else {
        Err(WealthError::InvalidCurrency(code.to_string()))
    }
}
