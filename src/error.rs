//! Error types for usagereport

use std::time::Duration;
use thiserror::Error;

/// Result type alias for usagereport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("--format {format} is not supported by `{command}` (use {supported})")]
    UnsupportedFormat {
        command: &'static str,
        format: &'static str,
        supported: String,
    },

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Platform API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Refresh the access token (USAGEREPORT_TOKEN).")]
    Unauthorized,

    #[error("Access denied. The token does not have permission to read this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API endpoint not configured. Pass --api or set api_endpoint in the config file.")]
    MissingApiEndpoint,

    #[error("Access token not configured. Pass --token or set USAGEREPORT_TOKEN.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Report history store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store I/O error: {0}")]
    Io(String),

    #[error("Could not determine home directory for the report store")]
    NoHome,
}

/// Errors raised while rendering a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Org {org} has a memory quota of 0 MB; cannot compute quota percentage")]
    ZeroQuota { org: String },
}
