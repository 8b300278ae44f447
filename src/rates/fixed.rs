//! Fixed rate provider for testing and offline composition

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::RateProvider;
use crate::types::{RateTable, WealthError, WealthResult};

/// Rate provider serving a static in-memory table
#[derive(Debug, Clone, Default)]
pub struct FixedRateProvider {
    rates: Arc<RwLock<RateTable>>,
}

impl FixedRateProvider {
    /// Create a provider with the given rates
    pub fn new<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            rates: Arc::new(RwLock::new(rates.into_iter().collect())),
        }
    }

    /// Create a provider with no rates at all; every fetch fails with
    /// `RateUnavailable`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set or replace the rate for a currency
    pub fn set_rate(&self, currency: &str, rate: f64) {
        self.rates
            .write()
            .unwrap()
            .insert(currency.to_string(), rate);
    }

    /// Drop the rate for a currency
    pub fn remove_rate(&self, currency: &str) {
        self.rates.write().unwrap().remove(currency);
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn get_rates(&self) -> WealthResult<RateTable> {
        let rates = self.rates.read().unwrap();
        if rates.is_empty() {
            return Err(WealthError::RateUnavailable);
        }
        Ok(rates.clone())
    }
}
