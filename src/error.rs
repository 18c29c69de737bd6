//! Custom error types for splitr
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for splitr operations
#[derive(Error, Debug)]
pub enum SplitrError {
    /// The OAuth token grant failed; no data call may be attempted
    #[error("Authentication failed{}: {message}", status_suffix(.status_code))]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// Network or HTTP layer failure after authentication
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Splitwise answered but reported an error in the body
    #[error("Splitwise error: {0}")]
    Api(String),

    /// Request rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed CSV input
    #[error("Import error: {0}")]
    Import(String),
}

fn status_suffix(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl SplitrError {
    /// Create an authentication error without a status code
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code: None,
        }
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Status code carried by an authentication error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SplitrError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitrError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SplitrError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

impl From<reqwest::Error> for SplitrError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for splitr operations
pub type SplitrResult<T> = Result<T, SplitrError>;
