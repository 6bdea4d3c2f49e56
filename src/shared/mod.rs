//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and anything that talks to its JSON API. All types are designed
//! for serialization and transmission over HTTP.

/// Photo and comment records, drafts and validation
pub mod photo;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use photo::{Comment, CommentDraft, NewComment, NewPhoto, Photo, PhotoDraft, PhotoWithComments};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
