//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CareerDeck
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CareerDeckError {
    #[error("Network error: {0}")]
    Network(String),

    /// The collaborator rejected our credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation was invoked without the identifier it needs.
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    /// The integrations collaborator did not hand back an authorization URL.
    #[error("Could not start connection: {0}")]
    ConnectionStart(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CareerDeck operations
pub type Result<T> = std::result::Result<T, CareerDeckError>;
