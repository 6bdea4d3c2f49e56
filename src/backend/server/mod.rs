//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Store selection and startup errors
//! └── init.rs         - App creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the store as `Arc<dyn Store>` and the `SessionStore`.
//! Both synchronize internally, so the state itself needs no lock.

/// Application state
pub mod state;

/// Store selection and startup errors
pub mod config;

/// App creation
pub mod init;

pub use config::{load_store, ServerError};
pub use init::{create_app, create_app_with_store};
pub use state::AppState;
