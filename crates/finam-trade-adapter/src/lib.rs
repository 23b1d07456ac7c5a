/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Finam Trade API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod catalog;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{JwtManager, TOKEN_ENV, TokenData, TokenManager};

pub use catalog::{RESOURCES, ResourceInfo};

// Re-export commonly used types from http
pub use http::{
    AccessTokens,
    Account,
    Assets,
    ClientConfig,
    FinamClient,
    FinamError,
    Instruments,
    Orders,
    Result,
    RetryConfig,
};

// Re-export all types
pub use types::*;
