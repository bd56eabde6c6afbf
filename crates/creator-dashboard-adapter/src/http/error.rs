/*
[INPUT]:  Error sources (HTTP, API, serialization, configuration)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the creator backend adapter
#[derive(Error, Debug)]
pub enum DashboardError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response body could not be read as structured data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            DashboardError::Http(_) | DashboardError::InvalidResponse(_) => true,
            DashboardError::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }

    /// Human-readable detail for surfacing to a user.
    ///
    /// Non-JSON bodies are shown verbatim rather than wrapped in the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            DashboardError::InvalidResponse(text) => text.clone(),
            DashboardError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        DashboardError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for creator backend operations
pub type Result<T> = std::result::Result<T, DashboardError>;
