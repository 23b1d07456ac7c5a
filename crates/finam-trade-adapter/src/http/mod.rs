/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod access_tokens;
pub mod account;
pub mod assets;
pub mod client;
pub mod error;
pub mod instruments;
pub mod orders;
pub mod retry;

pub use error::{FinamError, Result};
pub use retry::{ExponentialBackoff, RetryConfig};

pub use access_tokens::AccessTokens;
pub use account::Account;
pub use assets::Assets;
pub use client::{ClientConfig, FinamClient};
pub use instruments::Instruments;
pub use orders::Orders;
