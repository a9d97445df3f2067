//! Error types for the bulk SMS sender.
//!
//! This module defines custom error types using `thiserror` for precise error
//! handling. Configuration and roster errors are fatal and abort the run
//! before any network activity; transport errors stay scoped to the one
//! group whose send failed.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the Pushbullet API.
///
/// These are always captured per group by the dispatcher and never abort
/// sibling sends.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse the response body
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
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

/// Errors that can occur while loading or resolving a recipient roster.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Roster file could not be read
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    /// Roster document did not match the expected schema
    #[error("Roster document is malformed: {0}")]
    Schema(#[from] serde_json::Error),

    /// A phone number failed format validation
    #[error("Invalid phone number at {location}: {source}")]
    InvalidPhone {
        location: String,
        source: ValidationError,
    },
}

/// Convenience type alias for Results with TransportError
pub type TransportResult<T> = Result<T, TransportError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with RosterError
pub type RosterResult<T> = Result<T, RosterError>;
