//! Basic wallet usage example

use bigdecimal::BigDecimal;
use wealth_core::{FixedRateProvider, MemoryStore, WealthLedger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💱 Wealth Core - Basic Wallet Example\n");

    // Compose a ledger from an in-memory store and a fixed rate table.
    // Swap in HttpRateProvider::new("TRY") to pull live rates instead.
    let store = MemoryStore::new();
    let provider = FixedRateProvider::new([
        ("USD".to_string(), 30.0),
        ("EUR".to_string(), 33.0),
        ("GBP".to_string(), 38.5),
    ]);
    let ledger = WealthLedger::new(store, provider);

    // 1. Create an account seeded from the rate table
    println!("👤 Creating wallet for user 42...");
    let record = ledger.create_account(42).await?;
    for (currency, balance) in &record.balances {
        println!("  {currency}: {balance}");
    }
    println!();

    // 2. Buy some USD against the TRY seed balance
    println!("🛒 Buying 300 USD...");
    let record = ledger.exchange(42, "USD", BigDecimal::from(300), true).await?;
    println!("  TRY: {}", record.balance("TRY")?);
    println!("  USD: {}", record.balance("USD")?);
    println!();

    // 3. Sell half of it back
    println!("💸 Selling 150 USD...");
    let record = ledger.exchange(42, "USD", BigDecimal::from(150), false).await?;
    println!("  TRY: {}", record.balance("TRY")?);
    println!("  USD: {}", record.balance("USD")?);
    println!();

    // 4. Direct credit without conversion
    println!("➕ Crediting 25 EUR directly...");
    let record = ledger.transact(42, "EUR", BigDecimal::from(25), true).await?;
    println!("  EUR: {}", record.balance("EUR")?);
    println!();

    // 5. Overdrafts are rejected
    println!("🚫 Trying to debit 1000 EUR...");
    match ledger.transact(42, "EUR", BigDecimal::from(1000), false).await {
        Err(e) => println!("  rejected: {e}"),
        Ok(_) => unreachable!(),
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
