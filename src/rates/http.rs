//! HTTP rate provider backed by an exchange-rates JSON API

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::traits::RateProvider;
use crate::types::{RateTable, WealthError, WealthResult};

/// Wire shape of the rates endpoint
///
/// Only the `rates` object is consumed; `base`, `date` and any other fields
/// are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RatesResponse {
    pub(crate) rates: RateTable,
}

/// Rate provider fetching live rates over HTTP
///
/// Expects a JSON response with a `rates` field mapping currency codes to
/// numbers, base-normalized to the main currency (the `base` query
/// parameter of the default endpoint). Requests carry no timeout unless one
/// is set with [`with_timeout`](HttpRateProvider::with_timeout).
pub struct HttpRateProvider {
    http_client: HttpClient,
    endpoint: String,
}

impl HttpRateProvider {
    const DEFAULT_ENDPOINT: &'static str = "https://api.exchangeratesapi.io/latest";

    /// Create a provider against the default endpoint, with rates
    /// base-normalized to `base_currency`
    pub fn new(base_currency: &str) -> Self {
        Self::with_endpoint(format!(
            "{}?base={}",
            Self::DEFAULT_ENDPOINT,
            base_currency
        ))
    }

    /// Create a provider against a custom endpoint URL
    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
        }
    }

    /// Bound every rate request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> reqwest::Result<Self> {
        self.http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn get_rates(&self) -> WealthResult<RateTable> {
        debug!(endpoint = %self.endpoint, "fetching exchange rates");

        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| WealthError::Provider(format!("rate request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "rates endpoint returned an error");
            return Err(WealthError::Provider(format!(
                "rates endpoint returned {status}: {body}"
            )));
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| WealthError::Provider(format!("malformed rate response: {e}")))?;

        // A well-formed response with no rates still means there is nothing
        // to convert against, which callers must see as an error.
        if body.rates.is_empty() {
            warn!("rates endpoint returned an empty table");
            return Err(WealthError::RateUnavailable);
        }

        Ok(body.rates)
    }
}
