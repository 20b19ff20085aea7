//! Error types for the Anixart client and statistics pipeline.

use thiserror::Error;

/// Main error type for all wrapped operations.
#[derive(Debug, Error)]
pub enum WrappedError {
    /// Login or password rejected by the sign-in endpoint.
    #[error("Bad credentials: {0}")]
    BadCredentials(String),

    /// No session token is stored; the user must sign in first.
    #[error("Token not found: sign in first")]
    MissingToken,

    /// No profile id was given and none is stored in the session.
    #[error("Profile id not found")]
    MissingProfileId,

    /// The API answered with a non-zero envelope code.
    #[error("API error on {endpoint}: code {code}")]
    ApiError { endpoint: String, code: i64 },

    /// The API answered with a non-success HTTP status.
    #[error("HTTP {status} on {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// A required field was missing from an API response.
    #[error("No data from API: {0}")]
    NoDataApi(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for wrapped operations.
pub type Result<T> = std::result::Result<T, WrappedError>;
