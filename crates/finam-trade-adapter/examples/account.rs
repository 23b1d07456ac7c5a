/*
[INPUT]:  TOKEN and ACCOUNT_ID environment variables
[OUTPUT]: Account summary, recent transactions and trades
[POS]:    Examples - account queries
[UPDATE]: When adding new account endpoints
*/

use chrono::{Duration, Utc};
use finam_trade_adapter::*;

/// Example: inspect an account
///
/// Run with `TOKEN=<secret> ACCOUNT_ID=<id> cargo run --example account`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Finam Account Example ===\n");

    let Ok(account_id) = std::env::var("ACCOUNT_ID") else {
        eprintln!("ACCOUNT_ID environment variable is not set");
        return;
    };
    let client = match FinamClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.account().get_account_info(&account_id).await {
        Ok(info) => {
            println!("✓ Account {} ({}, {})", info.account_id, info.account_type, info.status);
            if let Some(equity) = info.equity {
                println!("  Equity: {}", equity.value);
            }
            for position in &info.positions {
                println!("  {} x {}", position.symbol, position.quantity.value);
            }
            for money in &info.cash {
                println!("  Cash: {} {}", money.to_decimal(), money.currency_code);
            }
        }
        Err(e) => println!("✗ Account info failed: {}", e),
    }

    let now = Utc::now();
    let week = Interval::new(now - Duration::days(7), now);
    let request = TransactionsRequest::new(&account_id)
        .with_limit(10)
        .with_interval(week);

    println!("\nTransactions over the last 7 days:");
    match client.account().get_transactions(&request).await {
        Ok(response) => {
            for tx in &response.transactions {
                println!("  {} {} {}", tx.timestamp, tx.category, tx.symbol);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nTrades over the last 7 days:");
    match client.account().get_trades(&request).await {
        Ok(response) => {
            for trade in &response.trades {
                println!(
                    "  {} {:?} {} @ {}",
                    trade.symbol, trade.side, trade.size.value, trade.price.value
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Account example complete");
}
