/*
[INPUT]:  API secret and session tokens
[OUTPUT]: Session token state and refresh coordination
[POS]:    Auth layer - handles Finam Trade API authentication
[UPDATE]: When auth flow or token lifecycle changes
*/

pub mod jwt;
pub mod manager;

pub use jwt::{JwtManager, TokenData, decode_expiry};
pub use manager::{TOKEN_ENV, TokenManager};
