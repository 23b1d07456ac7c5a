/*
[INPUT]:  TOKEN environment variable and a symbol
[OUTPUT]: Bars, latest quote, latest trades and order book
[POS]:    Examples - market data queries
[UPDATE]: When adding new market data endpoints
*/

use chrono::{Duration, Utc};
use finam_trade_adapter::*;

/// Example: market data for one instrument
///
/// Run with `TOKEN=<secret> cargo run --example instruments`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Finam Market Data Example ===\n");

    let client = match FinamClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    let market = client.instruments();
    let symbol = "SBER@MISX";

    let now = Utc::now();
    let request = BarsRequest::new(symbol, TimeFrame::D, Interval::new(now - Duration::days(30), now));
    println!("Daily bars for {}...", symbol);
    match market.get_bars(&request).await {
        Ok(response) => {
            for bar in response.bars.iter().rev().take(5) {
                println!("  {} close {}", bar.timestamp, bar.close.value);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nLatest quote...");
    match market.get_last_quote(symbol).await {
        Ok(response) => println!(
            "✓ bid {:?} ask {:?} mid {:?}",
            response.quote.bid.map(|b| b.value),
            response.quote.ask.map(|a| a.value),
            response.quote.mid_price()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nLatest trades...");
    match market.get_last_trades(symbol).await {
        Ok(response) => println!("✓ {} trades", response.trades.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nOrder book...");
    match market.get_order_book(symbol).await {
        Ok(response) => println!(
            "✓ best bid {:?} best ask {:?}",
            response.orderbook.best_bid(),
            response.orderbook.best_ask()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
