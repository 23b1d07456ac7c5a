/*
[INPUT]:  Value of the TOKEN environment variable, resource catalogue
[OUTPUT]: Plain-text walkthrough of the client library
[POS]:    Demo report - pure rendering shared by the binary and tests
[UPDATE]: When the library surface, examples or install steps change
*/

use std::fmt::Write;

use finam_trade_adapter::RESOURCES;

const WIDTH: usize = 80;
const TOKENS_URL: &str = "https://tradeapi.finam.ru/docs/tokens";

/// Section headings in print order
pub const SECTION_TITLES: [&str; 5] = [
    "Client Structure:",
    "Client Initialization Example:",
    "Available Examples:",
    "Installation:",
    "For more information, visit:",
];

pub const TOKEN_SET_LINE: &str = "✓ TOKEN environment variable is set!";
pub const TOKEN_UNSET_LINE: &str = "✗ TOKEN environment variable is not set.";

/// True when the variable carries a usable value; empty counts as unset
pub fn token_present(token: Option<&str>) -> bool {
    token.is_some_and(|t| !t.is_empty())
}

/// Full report for the given `TOKEN` value
pub fn render_report(token: Option<&str>) -> String {
    let mut out = String::new();
    library_info(&mut out);
    client_structure(&mut out);
    initialization_example(&mut out);
    examples_list(&mut out);
    installation(&mut out);
    footer(&mut out);
    token_status(&mut out, token_present(token));
    out
}

fn heavy_rule() -> String {
    "=".repeat(WIDTH)
}

fn light_rule() -> String {
    "-".repeat(WIDTH)
}

fn library_info(out: &mut String) {
    writeln!(out, "{}", heavy_rule()).ok();
    writeln!(out, "finam-trade-adapter - Async REST Client for Finam Trade API").ok();
    writeln!(out, "{}", heavy_rule()).ok();
    writeln!(out, "\nThis is a Rust library for interacting with Finam Trade API.").ok();
    writeln!(out, "\nLibrary Version: {}", env!("CARGO_PKG_VERSION")).ok();
    writeln!(out, "\nKey Features:").ok();
    writeln!(out, "  • Asynchronous REST client using reqwest and tokio").ok();
    writeln!(out, "  • Typed request and response models using serde").ok();
    writeln!(out, "  • Support for:").ok();
    writeln!(out, "    - Access token management").ok();
    writeln!(out, "    - Account information and transactions").ok();
    writeln!(out, "    - Assets and instruments data").ok();
    writeln!(out, "    - Market data (quotes, trades, order books)").ok();
    writeln!(out, "    - Order management").ok();
    writeln!(out, "\n{}", heavy_rule()).ok();
}

fn client_structure(out: &mut String) {
    writeln!(out, "\n{}", SECTION_TITLES[0]).ok();
    writeln!(out, "{}", light_rule()).ok();
    writeln!(out, "\nThe FinamClient type provides access to the following resources:").ok();
    for (index, resource) in RESOURCES.iter().enumerate() {
        writeln!(out, "\n{}. {} - {}", index + 1, resource.name, resource.summary).ok();
        for method in resource.methods {
            writeln!(out, "   • {method}").ok();
        }
    }
    writeln!(out, "{}", light_rule()).ok();
}

fn initialization_example(out: &mut String) {
    writeln!(out, "\n{}", SECTION_TITLES[1]).ok();
    writeln!(out, "{}", light_rule()).ok();
    writeln!(out, "\n// Initialize client with token manager").ok();
    writeln!(out, "let tokens = TokenManager::from_env()?;  // reads TOKEN").ok();
    writeln!(out, "let client = FinamClient::new(tokens)?;").ok();
    writeln!(out, "\n// Exchange the secret for a session token").ok();
    writeln!(out, "client.access_tokens().set_jwt_token().await?;").ok();
    writeln!(out, "\n// Now you can use the client to access various API endpoints").ok();
    writeln!(out, "\nNOTE: To actually use this library, you need:").ok();
    writeln!(out, "  1. A valid API token from {TOKENS_URL}").ok();
    writeln!(out, "  2. Set it as TOKEN environment variable").ok();
    writeln!(out, "  3. (Optional) Set ACCOUNT_ID for account-specific operations").ok();
    writeln!(out, "{}", light_rule()).ok();
}

fn examples_list(out: &mut String) {
    writeln!(out, "\n{}", SECTION_TITLES[2]).ok();
    writeln!(out, "{}", light_rule()).ok();
    writeln!(out, "\nThe adapter's 'examples/' directory contains working code samples:").ok();
    writeln!(out, "\n• access_token   - Token authentication").ok();
    writeln!(out, "• account        - Account information and transactions").ok();
    writeln!(out, "• assets         - Asset and exchange information").ok();
    writeln!(out, "• instruments    - Market data (bars, quotes, order book)").ok();
    writeln!(out, "• orders         - Order placement and cancellation").ok();
    writeln!(out, "\nTo run an example:").ok();
    writeln!(out, "  1. Set your TOKEN environment variable").ok();
    writeln!(out, "  2. Set ACCOUNT_ID if needed").ok();
    writeln!(out, "  3. Run: cargo run -p finam-trade-adapter --example <example_name>").ok();
    writeln!(out, "{}", light_rule()).ok();
}

fn installation(out: &mut String) {
    writeln!(out, "\n{}", SECTION_TITLES[3]).ok();
    writeln!(out, "{}", light_rule()).ok();
    writeln!(out, "\nAs a git dependency:").ok();
    writeln!(out, "  cargo add finam-trade-adapter --git <repository-url>").ok();
    writeln!(out, "\nFrom a local checkout:").ok();
    writeln!(out, "  cargo add finam-trade-adapter --path crates/finam-trade-adapter").ok();
    writeln!(out, "\nDevelopment build:").ok();
    writeln!(out, "  cargo build --workspace").ok();
    writeln!(out, "{}", light_rule()).ok();
}

fn footer(out: &mut String) {
    writeln!(out, "\n{}", heavy_rule()).ok();
    writeln!(out, "{}", SECTION_TITLES[4]).ok();
    writeln!(out, "  • Documentation: https://tradeapi.finam.ru/docs/about/").ok();
    writeln!(out, "  • API tokens: {TOKENS_URL}").ok();
    writeln!(out, "{}\n", heavy_rule()).ok();
}

fn token_status(out: &mut String, present: bool) {
    if present {
        writeln!(out, "\n{TOKEN_SET_LINE}").ok();
        writeln!(out, "  You can run the examples in the 'examples/' directory.").ok();
    } else {
        writeln!(out, "\n{TOKEN_UNSET_LINE}").ok();
        writeln!(out, "  To use the API, get a token from {TOKENS_URL}").ok();
        writeln!(out, "  and set it as an environment variable.").ok();
    }
}
