//! Main ledger orchestrator coordinating the store and the rate provider

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, FromPrimitive, Zero};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{validate_currency_code, validate_positive_amount};

/// Multi-currency wallet ledger
///
/// Orchestrates account creation, currency exchange against the main
/// currency, and direct credit/debit transactions over a [`LedgerStore`]
/// and a [`RateProvider`].
///
/// Mutating operations on the same user are serialized through a
/// per-account lock held across the whole read-modify-write span, so
/// concurrent exchanges or transactions against one account cannot lose
/// updates. Operations on different users proceed in parallel.
pub struct WealthLedger<S: LedgerStore, R: RateProvider> {
    store: S,
    provider: R,
    config: LedgerConfig,
    account_locks: StdMutex<HashMap<u64, Arc<AsyncMutex<()>>>>,
}

impl<S: LedgerStore, R: RateProvider> WealthLedger<S, R> {
    /// Create a ledger with the default policy (TRY anchor, 130000 seed)
    pub fn new(store: S, provider: R) -> Self {
        Self::with_config(store, provider, LedgerConfig::default())
    }

    /// Create a ledger with a custom policy
    pub fn with_config(store: S, provider: R, config: LedgerConfig) -> Self {
        Self {
            store,
            provider,
            config,
            account_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// The policy this ledger runs with
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Create a wealth account for `user_id`, seeded from live rates
    ///
    /// The new record gets a zero balance for every currency in the
    /// provider's rate table, then the main currency is credited with the
    /// configured initial balance. Fails with `DuplicateAccount` if the
    /// user already has a record and with `RateUnavailable` if no rates
    /// could be obtained.
    pub async fn create_account(&self, user_id: u64) -> WealthResult<WealthRecord> {
        let _guard = self.lock_account(user_id).await;

        if self.store.find_by_id(user_id).await?.is_some() {
            return Err(WealthError::DuplicateAccount(user_id));
        }

        let rates = self.provider.get_rates().await?;
        if rates.is_empty() {
            return Err(WealthError::RateUnavailable);
        }

        let mut record = WealthRecord::new(user_id, rates.into_keys());
        record.credit(&self.config.main_currency, &self.config.initial_balance);

        self.store.save(&record).await?;
        debug!(user_id, "created wealth account");
        Ok(record)
    }

    /// Convert between `currency` and the main currency at the current rate
    ///
    /// Buying spends the main currency to acquire `amount` of `currency`;
    /// selling is the inverse. The main-currency leg is
    /// `amount / rate` rounded half-up to the configured scale. The updated
    /// record is persisted and returned.
    pub async fn exchange(
        &self,
        user_id: u64,
        currency: &str,
        amount: BigDecimal,
        is_buying: bool,
    ) -> WealthResult<WealthRecord> {
        let _guard = self.lock_account(user_id).await;

        let mut record = self.load(user_id).await?;
        validate_currency_code(currency)?;
        if !record.has_currency(currency) {
            return Err(WealthError::InvalidCurrency(currency.to_string()));
        }
        validate_positive_amount(&amount)?;

        let rates = self.provider.get_rates().await?;
        let rate = rates
            .get(currency)
            .copied()
            .ok_or(WealthError::RateUnavailable)?;
        let main_equivalent = main_equivalent(&amount, rate, self.config.rate_scale)?;

        if is_buying {
            record.debit(&self.config.main_currency, &main_equivalent)?;
            record.credit(currency, &amount);
        } else {
            record.debit(currency, &amount)?;
            record.credit(&self.config.main_currency, &main_equivalent);
        }

        self.store.save(&record).await?;
        debug!(
            user_id,
            currency,
            %amount,
            %main_equivalent,
            is_buying,
            "exchanged currency"
        );
        Ok(record)
    }

    /// Credit or debit a single currency balance without conversion
    ///
    /// The updated record is persisted and returned.
    pub async fn transact(
        &self,
        user_id: u64,
        currency: &str,
        amount: BigDecimal,
        is_credit: bool,
    ) -> WealthResult<WealthRecord> {
        let _guard = self.lock_account(user_id).await;

        let mut record = self.load(user_id).await?;
        validate_currency_code(currency)?;
        if !record.has_currency(currency) {
            return Err(WealthError::InvalidCurrency(currency.to_string()));
        }
        validate_positive_amount(&amount)?;

        if is_credit {
            record.credit(currency, &amount);
        } else {
            record.debit(currency, &amount)?;
        }

        self.store.save(&record).await?;
        debug!(user_id, currency, %amount, is_credit, "recorded transaction");
        Ok(record)
    }

    /// Get the wealth record for `user_id`
    ///
    /// Pure read; fails with `AccountNotFound` if absent.
    pub async fn get_record(&self, user_id: u64) -> WealthResult<WealthRecord> {
        self.load(user_id).await
    }

    async fn load(&self, user_id: u64) -> WealthResult<WealthRecord> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(WealthError::AccountNotFound(user_id))
    }

    async fn lock_account(&self, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.account_locks.lock().unwrap();
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }
}

/// Main-currency equivalent of `amount` at `rate`, rounded half-up
///
/// `rate` is units of the foreign currency per one unit of the main
/// currency. A rate that is not positive and finite cannot be converted and
/// yields `RateUnavailable`.
fn main_equivalent(amount: &BigDecimal, rate: f64, scale: i64) -> WealthResult<BigDecimal> {
    let rate = BigDecimal::from_f64(rate)
        .filter(|r| r > &BigDecimal::zero())
        .ok_or(WealthError::RateUnavailable)?;
    Ok((amount / rate).with_scale_round(scale, RoundingMode::HalfUp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::FixedRateProvider;
    use crate::store::MemoryStore;
    use std::str::FromStr;

    fn test_ledger() -> WealthLedger<MemoryStore, FixedRateProvider> {
        let store = MemoryStore::new();
        let provider = FixedRateProvider::new([("USD".to_string(), 30.0), ("EUR".to_string(), 33.0)]);
        WealthLedger::new(store, provider)
    }

    #[test]
    fn main_equivalent_rounds_half_up_at_scale() {
        // 1 / 2e9 = 0.0000000005 exactly; half-up at 9 digits bumps to 1e-9
        let result = main_equivalent(&BigDecimal::from(1), 2_000_000_000.0, 9).unwrap();
        assert_eq!(result, BigDecimal::from_str("0.000000001").unwrap());

        // repeating expansion truncates at the scale
        let result = main_equivalent(&BigDecimal::from(100), 3.0, 9).unwrap();
        assert_eq!(result, BigDecimal::from_str("33.333333333").unwrap());
    }

    #[test]
    fn main_equivalent_rejects_unusable_rates() {
        let amount = BigDecimal::from(10);
        assert!(matches!(
            main_equivalent(&amount, 0.0, 9),
            Err(WealthError::RateUnavailable)
        ));
        assert!(matches!(
            main_equivalent(&amount, -1.5, 9),
            Err(WealthError::RateUnavailable)
        ));
        assert!(matches!(
            main_equivalent(&amount, f64::NAN, 9),
            Err(WealthError::RateUnavailable)
        ));
    }

    #[tokio::test]
    async fn create_account_seeds_main_currency() {
        let ledger = test_ledger();
        let record = ledger.create_account(1).await.unwrap();

        assert_eq!(record.balance("TRY").unwrap(), &BigDecimal::from(130000));
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::zero());
        assert_eq!(record.balance("EUR").unwrap(), &BigDecimal::zero());
        assert_eq!(record.balances.len(), 3);
    }

    #[tokio::test]
    async fn create_account_twice_is_rejected() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        let err = ledger.create_account(1).await.unwrap_err();
        assert!(matches!(err, WealthError::DuplicateAccount(1)));
    }

    #[tokio::test]
    async fn create_account_fails_without_rates() {
        let store = MemoryStore::new();
        let provider = FixedRateProvider::empty();
        let ledger = WealthLedger::new(store, provider);

        let err = ledger.create_account(1).await.unwrap_err();
        assert!(matches!(err, WealthError::RateUnavailable));
    }

    #[tokio::test]
    async fn buying_debits_main_and_credits_currency() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        let record = ledger
            .exchange(1, "USD", BigDecimal::from(300), true)
            .await
            .unwrap();

        // 300 / 30.0 = 10 TRY spent
        assert_eq!(record.balance("TRY").unwrap(), &BigDecimal::from(129990));
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::from(300));
    }

    #[tokio::test]
    async fn selling_debits_currency_and_credits_main() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();
        ledger
            .exchange(1, "USD", BigDecimal::from(300), true)
            .await
            .unwrap();

        let record = ledger
            .exchange(1, "USD", BigDecimal::from(300), false)
            .await
            .unwrap();

        assert_eq!(record.balance("TRY").unwrap(), &BigDecimal::from(130000));
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::zero());
    }

    #[tokio::test]
    async fn buying_more_than_main_balance_fails() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        // 130000 TRY buys at most 130000 * 30 USD
        let err = ledger
            .exchange(1, "USD", BigDecimal::from(3_900_001), true)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::InsufficientFunds(c) if c == "TRY"));
    }

    #[tokio::test]
    async fn buying_exactly_the_main_balance_succeeds() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        let record = ledger
            .exchange(1, "USD", BigDecimal::from(3_900_000), true)
            .await
            .unwrap();
        assert_eq!(record.balance("TRY").unwrap(), &BigDecimal::zero());
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::from(3_900_000));
    }

    #[tokio::test]
    async fn selling_more_than_held_fails() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        let err = ledger
            .exchange(1, "USD", BigDecimal::from(1), false)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::InsufficientFunds(c) if c == "USD"));
    }

    #[tokio::test]
    async fn exchange_validates_currency_before_amount() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        // unknown currency wins even with a bad amount
        let err = ledger
            .exchange(1, "GBP", BigDecimal::zero(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::InvalidCurrency(c) if c == "GBP"));

        let err = ledger
            .exchange(1, "USD", BigDecimal::zero(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn exchange_fails_when_rate_is_missing() {
        let store = MemoryStore::new();
        let provider = FixedRateProvider::new([("USD".to_string(), 30.0)]);
        let ledger = WealthLedger::new(store, provider);
        ledger.create_account(1).await.unwrap();

        // currency exists on the record but the provider dropped it
        ledger.provider.remove_rate("USD");
        let err = ledger
            .exchange(1, "USD", BigDecimal::from(10), true)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::RateUnavailable));
    }

    #[tokio::test]
    async fn transact_credits_and_debits() {
        let ledger = test_ledger();
        ledger.create_account(1).await.unwrap();

        let record = ledger
            .transact(1, "USD", BigDecimal::from(300), true)
            .await
            .unwrap();
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::from(300));

        let err = ledger
            .transact(1, "USD", BigDecimal::from(301), false)
            .await
            .unwrap_err();
        assert!(matches!(err, WealthError::InsufficientFunds(c) if c == "USD"));

        let record = ledger
            .transact(1, "USD", BigDecimal::from(300), false)
            .await
            .unwrap();
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::zero());
    }

    #[tokio::test]
    async fn operations_require_an_account() {
        let ledger = test_ledger();

        assert!(matches!(
            ledger.get_record(42).await.unwrap_err(),
            WealthError::AccountNotFound(42)
        ));
        assert!(matches!(
            ledger
                .exchange(42, "USD", BigDecimal::from(1), true)
                .await
                .unwrap_err(),
            WealthError::AccountNotFound(42)
        ));
        assert!(matches!(
            ledger
                .transact(42, "USD", BigDecimal::from(1), true)
                .await
                .unwrap_err(),
            WealthError::AccountNotFound(42)
        ));
    }

    #[tokio::test]
    async fn concurrent_transactions_do_not_lose_updates() {
        let ledger = Arc::new(test_ledger());
        ledger.create_account(1).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                ledger.transact(1, "USD", BigDecimal::from(1), true).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = ledger.get_record(1).await.unwrap();
        assert_eq!(record.balance("USD").unwrap(), &BigDecimal::from(10));
    }
}
