//! Error types for huddle operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Application-level refusal carried inside an otherwise successful payload.
///
/// Not a Rust error type on purpose: the transport succeeded and the payload
/// committed nothing, so there is nothing to roll back. The caller's
/// `on_completed` decides what the refusal means for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppError {
    pub message: String,
    pub title: Option<String>,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{}: {}", title, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Transport layer errors: the call itself failed, no payload exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network failure during {operation}: {reason}")]
    Network { operation: String, reason: String },

    #[error("Serialization failure during {operation}: {reason}")]
    Serialization { operation: String, reason: String },

    #[error("Timed out waiting for {operation}")]
    Timeout { operation: String },
}

/// Session token errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Malformed session token: {reason}")]
    MalformedToken { reason: String },

    #[error("Session token missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all huddle errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HuddleError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for huddle operations.
pub type HuddleResult<T> = Result<T, HuddleError>;

// =============================================================================
// TESTS
// =============================================================================
