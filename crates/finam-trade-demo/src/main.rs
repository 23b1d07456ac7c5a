/*
[INPUT]:  CLI arguments, TOKEN environment variable
[OUTPUT]: Library walkthrough on stdout, optional live session check
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the report flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use finam_trade_adapter::{FinamClient, TOKEN_ENV};
use finam_trade_demo::{render_report, token_present};

#[derive(Parser, Debug)]
#[command(name = "finam-trade-demo", version, about = "Finam Trade API client walkthrough")]
struct Cli {
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    /// Exchange TOKEN for a session and print its details
    #[arg(long = "check-session")]
    check_session: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    if let Err(err) = init_tracing(&args.log_level) {
        eprintln!("warning: {err:#}");
    }

    let token = std::env::var(TOKEN_ENV).ok();
    print!("{}", render_report(token.as_deref()));

    if args.check_session {
        if token_present(token.as_deref()) {
            if let Err(err) = check_session().await {
                warn!(error = %format!("{err:#}"), "session check failed");
            }
        } else {
            info!("session check skipped; {TOKEN_ENV} is not set");
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

async fn check_session() -> Result<()> {
    let client = FinamClient::from_env().context("build client from environment")?;

    client
        .access_tokens()
        .set_jwt_token()
        .await
        .context("exchange secret for session token")?;
    let details = client
        .access_tokens()
        .get_jwt_token_details()
        .await
        .context("fetch token details")?;

    println!("\nSession details:");
    println!("  Created:   {}", details.created_at);
    println!("  Expires:   {}", details.expires_at);
    println!("  Read-only: {}", details.readonly);
    println!("  Accounts:  {}", details.account_ids.join(", "));
    Ok(())
}
