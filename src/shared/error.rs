//! Shared Error Types
//!
//! This module defines error types that are shared between the store, the
//! handlers and API clients. These errors represent failures that are caused by
//! the input itself rather than by the server.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field failed validation
//! - `InvalidId` - An identifier is not a well-formed UUID
//!
//! # Usage
//!
//! ```rust
//! use snapshare::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types caused by client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Identifier that does not parse as a UUID
    #[error("Invalid id: {id}")]
    InvalidId {
        /// The rejected identifier, as received
        id: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid id error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }
}

/// Parse a path identifier into a UUID
///
/// Returns `SharedError::InvalidId` when the string is not a UUID.
pub fn parse_id(raw: &str) -> Result<uuid::Uuid, SharedError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| SharedError::invalid_id(raw))
}
