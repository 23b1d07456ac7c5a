/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, configuration)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorBody;

/// Main error type for the Finam adapter
#[derive(Error, Debug)]
pub enum FinamError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: i32,
        message: String,
    },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session token is missing or expired and could not be refreshed
    #[error("JWT token expired, please re-authenticate")]
    TokenExpired,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Requested entity does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Transient failures persisted through every retry
    #[error("Request failed after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },
}

impl FinamError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            FinamError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            FinamError::Api { status, .. } => is_retryable_status(*status),
            FinamError::RateLimit { .. } | FinamError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            FinamError::RateLimit { retry_after } => Some(*retry_after),
            FinamError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            FinamError::Authentication { .. } | FinamError::TokenExpired
        )
    }

    /// Build an error from a non-success status and the raw response body
    ///
    /// Gateway errors look like `{"code": 3, "message": "...", "details": []}`;
    /// anything else is kept verbatim as the message.
    pub fn from_status(status: StatusCode, body: &str, resource: &str) -> Self {
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) if !parsed.message.is_empty() => (parsed.code, parsed.message),
            _ => (i32::from(status.as_u16()), body.trim().to_string()),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FinamError::Authentication { message }
            }
            StatusCode::NOT_FOUND => FinamError::NotFound {
                resource: resource.to_string(),
            },
            _ => FinamError::Api {
                status: status.as_u16(),
                code,
                message,
            },
        }
    }
}

/// Statuses worth another attempt with the same request
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for Finam operations
pub type Result<T> = std::result::Result<T, FinamError>;
