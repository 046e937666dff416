//! Error types for omeka-harvest
//!
//! The harvest favors partial progress: most remote failures are logged and
//! swallowed at the site where they occur. The variants here cover the
//! failures that do surface to callers (configuration, export, and the
//! initial request plumbing).

use thiserror::Error;

/// Result type alias for omeka-harvest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for omeka-harvest
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "API_BASE_URL")
        key: Option<String>,
    },

    /// Network error (transport-level failure from the HTTP client)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http {
        /// The status code the server returned
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Invalid or unjoinable URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error for a missing environment variable
    pub fn missing_env(key: &str) -> Self {
        Error::Config {
            message: format!("required environment variable {key} is not set"),
            key: Some(key.to_string()),
        }
    }
}
