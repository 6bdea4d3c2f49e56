/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers. Errors from
 * the store, the auth layer and input validation all convert into it, and
 * each variant maps to one HTTP status.
 *
 * # Status Mapping
 *
 * - `HandlerError` - Carries its own status (e.g. a rejected request body)
 * - `SharedError` - 400 Bad Request (validation, malformed id, bad JSON)
 * - `NotFound` - 404 Not Found
 * - `Unauthorized` - 401 Unauthorized (bad credentials or session)
 * - `Conflict` - 409 Conflict (username taken, comment already attached)
 * - `StorageError` - 500 Internal Server Error
 * - `InternalError` - 500 Internal Server Error (hashing, token signing)
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::users::AuthError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use snapshare::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::not_found("Photo not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Input rejected by validation or parsing
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// The addressed record does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Credentials or session rejected
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// The request conflicts with existing data
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// The store failed
    #[error("Storage error: {message}")]
    StorageError {
        /// Backend failure description, logged but not returned to clients
        message: String,
    },

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    InternalError {
        /// Failure description, logged but not returned to clients
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::StorageError { .. } | Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to clients
    ///
    /// Server-side failures are reported generically; their detail only goes
    /// to the log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. }
            | Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Conflict { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::StorageError { .. } | Self::InternalError { .. } => "Internal server error".to_string(),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::not_found(format!("{} {} not found", entity, id)),
            StoreError::DuplicateUsername(_) => Self::Conflict {
                message: "Username already taken".to_string(),
            },
            StoreError::AlreadyAttached { comment } => Self::Conflict {
                message: format!("Comment {} is already attached", comment),
            },
            StoreError::Storage(message) => Self::StorageError { message },
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(shared) => Self::SharedError(shared),
            AuthError::DuplicateUsername(_) => Self::Conflict {
                message: "Username already taken".to_string(),
            },
            AuthError::AuthFailure | AuthError::SessionInvalid => Self::unauthorized(err.to_string()),
            AuthError::Hashing(message) | AuthError::Token(message) => Self::InternalError { message },
            AuthError::Store(store) => store.into(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::handler(rejection.status(), rejection.body_text())
    }
}
