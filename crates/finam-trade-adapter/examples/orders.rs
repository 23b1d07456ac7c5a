/*
[INPUT]:  TOKEN, ACCOUNT_ID and order parameters
[OUTPUT]: Placed, queried and cancelled order states
[POS]:    Examples - order lifecycle
[UPDATE]: When order endpoints change
*/

use finam_trade_adapter::*;
use rust_decimal_macros::dec;

/// Example: place a far-from-market limit order and cancel it
///
/// Sends a real order. Run with
/// `TOKEN=<secret> ACCOUNT_ID=<id> cargo run --example orders`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Finam Orders Example ===\n");

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
    let orders = client.orders();

    let request = OrderRequest::limit(&account_id, "SBER@MISX", Side::Buy, dec!(1), dec!(1))
        .with_generated_client_order_id();
    let placed = match orders.place_order(&request).await {
        Ok(state) => {
            println!("✓ Placed order {} ({:?})", state.order_id, state.status);
            state
        }
        Err(e) => {
            eprintln!("✗ Place failed: {}", e);
            return;
        }
    };

    match orders.get_order(&account_id, &placed.order_id).await {
        Ok(state) => println!("✓ Order status: {:?}", state.status),
        Err(e) => println!("✗ Error: {}", e),
    }

    match orders.cancel_order(&account_id, &placed.order_id).await {
        Ok(state) => println!("✓ Cancelled, status {:?}", state.status),
        Err(e) => println!("✗ Cancel failed: {}", e),
    }

    match orders.get_orders(&account_id).await {
        Ok(response) => println!("✓ {} orders on the account", response.orders.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Orders example complete");
}
