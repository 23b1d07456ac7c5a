/*
[INPUT]:  API secret from the TOKEN environment variable
[OUTPUT]: Session token and its details
[POS]:    Examples - session exchange
[UPDATE]: When auth flow changes
*/

use finam_trade_adapter::*;

/// Example: exchange the secret for a session token
///
/// Run with `TOKEN=<secret> cargo run --example access_token`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Finam Access Token Example ===\n");

    let client = match FinamClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}", client.config().base_url);

    match client.access_tokens().set_jwt_token().await {
        Ok(_) => println!("✓ Session token obtained"),
        Err(e) => {
            eprintln!("✗ Session exchange failed: {}", e);
            return;
        }
    }

    match client.access_tokens().get_jwt_token_details().await {
        Ok(details) => {
            println!("  Created:   {}", details.created_at);
            println!("  Expires:   {}", details.expires_at);
            println!("  Read-only: {}", details.readonly);
            println!("  Accounts:  {:?}", details.account_ids);
            for permission in &details.md_permissions {
                println!(
                    "  Market data: {} (delay {} min)",
                    permission.quote_level, permission.delay_minutes
                );
            }
        }
        Err(e) => println!("✗ Token details failed: {}", e),
    }

    println!("\n✓ Access token example complete");
}
