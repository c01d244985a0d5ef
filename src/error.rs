//! Error types for the agency phone sync.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the agency-management API.
#[derive(Error, Debug)]
pub enum AgencyApiError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl AgencyApiError {
    /// True when the response body could not be decoded into the expected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, AgencyApiError::JsonError(_))
    }

    /// True for every failure that happened at the transport or status level.
    pub fn is_transport(&self) -> bool {
        !self.is_decode()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while writing an export file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The destination could not be created or written
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// The entries could not be serialized
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AgencyApiError
pub type AgencyApiResult<T> = Result<T, AgencyApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ExportError
pub type ExportResult<T> = Result<T, ExportError>;
