//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions and source conversions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! HTML handlers do not use this type directly; they wrap it in
//! `pages::PageError`, which renders the same status as an HTML page.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
