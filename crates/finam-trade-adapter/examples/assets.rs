/*
[INPUT]:  TOKEN and optional ACCOUNT_ID environment variables
[OUTPUT]: Exchanges, instrument details, trading parameters and schedule
[POS]:    Examples - reference data queries
[UPDATE]: When adding new asset endpoints
*/

use finam_trade_adapter::*;

/// Example: reference data for an instrument
///
/// Run with `TOKEN=<secret> ACCOUNT_ID=<id> cargo run --example assets`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Finam Assets Example ===\n");

    let client = match FinamClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    let assets = client.assets();
    let symbol = "SBER@MISX";

    match assets.get_exchanges().await {
        Ok(response) => println!("✓ {} exchanges", response.exchanges.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    match assets.get_clock().await {
        Ok(clock) => println!("✓ Server time: {}", clock.timestamp),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nTrading schedule for {}:", symbol);
    match assets.get_schedule(symbol).await {
        Ok(schedule) => {
            for session in &schedule.sessions {
                println!(
                    "  {} {} - {}",
                    session.session_type, session.interval.start_time, session.interval.end_time
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    let Ok(account_id) = std::env::var("ACCOUNT_ID") else {
        println!("\nSet ACCOUNT_ID to query account-specific asset data");
        return;
    };

    println!("\nAsset details for {}:", symbol);
    match assets.get_asset(symbol, &account_id).await {
        Ok(asset) => println!(
            "  {} on {} board {}, lot {:?}",
            asset.name, asset.mic, asset.board, asset.lot_size.map(|l| l.value)
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    match assets.get_asset_params(symbol, &account_id).await {
        Ok(params) => println!(
            "  tradeable={} longable={} shortable={}",
            params.tradeable,
            params.longable.as_ref().is_some_and(|a| a.is_available()),
            params.shortable.as_ref().is_some_and(|a| a.is_available()),
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Assets example complete");
}
