//! Backend Module
//!
//! This module contains all server-side code for SnapShare. It provides an
//! Axum HTTP server serving a JSON API and server-rendered pages on top of a
//! typed photo/comment/user store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration loading, application state, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Store traits with PostgreSQL and in-memory backends
//! - **`auth`** - Registration, authentication, session tokens, flashes
//! - **`middleware`** - Session resolution for every request
//! - **`photos`** - Photo and comment JSON API
//! - **`pages`** - HTML views
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── store/          - Store traits and backends
//! ├── auth/           - Users, sessions and auth handlers
//! ├── middleware/     - Session middleware and extractors
//! ├── photos/         - Photo and comment handlers
//! ├── pages/          - HTML views and page handlers
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the store (`Arc<dyn Store>`) and the
//! `SessionStore`. Both are cheap to clone and safe to use from concurrent
//! requests. There is no global mutable state.
//!
//! # Comment Attachment
//!
//! Creating a comment and appending its reference to the owning photo is one
//! store operation (`PhotoStore::create_comment`). Either both happen or
//! neither does, and concurrent appends to the same photo are serialized by
//! the store.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Store traits and backends
pub mod store;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Photo and comment API
pub mod photos;

/// Server-rendered pages
pub mod pages;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::create_app;
pub use error::BackendError;
pub use store::{MemoryStore, PgStore, Store, StoreError};
