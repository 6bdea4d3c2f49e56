//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`session`** - Resolves the caller's session on every request and
//!   provides the `Session`, `CurrentUser` and `AuthUser` extractors, plus
//!   the cookie helpers used by the auth and page handlers.

pub mod session;

pub use session::{session_middleware, AuthUser, CurrentUser, Session};
