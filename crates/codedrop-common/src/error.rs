//! Error types and utilities for codedrop

use thiserror::Error;

/// Result type alias for codedrop operations
pub type Result<T> = std::result::Result<T, DropError>;

/// Main error type for codedrop operations
#[derive(Error, Debug)]
pub enum DropError {
    /// The named code set is not registered
    #[error("Code set not found: {name}")]
    NotFound {
        /// Requested set name
        name: String,
    },

    /// A code set with this name is already registered
    #[error("Code set already exists: {name}")]
    AlreadyExists {
        /// Requested set name
        name: String,
    },

    /// The set has no available codes left
    #[error("No codes available in set: {name}")]
    EmptyInventory {
        /// Requested set name
        name: String,
    },

    /// Rejected user input (bad name, missing or malformed archive, bad amount)
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Downloading an attachment failed
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DropError {
    /// Create a not-found error for a set name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an already-exists error for a set name
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    /// Create an empty-inventory error for a set name
    pub fn empty_inventory(name: impl Into<String>) -> Self {
        Self::EmptyInventory { name: name.into() }
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new invalid-input error naming the offending field
    pub fn invalid_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new transport error with the HTTP status that caused it
    pub fn transport_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new transport error with source
    pub fn transport_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is an expected outcome that should be answered
    /// with a reply rather than surfaced as a failure.
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::AlreadyExists { .. }
                | Self::EmptyInventory { .. }
                | Self::InvalidInput { .. }
                | Self::Transport { .. }
        )
    }
}
