//! SnapShare - Main Library
//!
//! SnapShare is a small photo-sharing web application built with Rust.
//! Users sign up and log in, browse a photo list, open a single photo with its
//! comments, and post new photos and comments.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared by the server and its clients
//!   - Photo and comment records, drafts and their validation
//!   - Application configuration
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and server-rendered pages
//!   - Authentication and session management
//!   - Photo/comment store backed by PostgreSQL or process memory
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enabled by default)
//!   - Includes Axum server, sqlx store, bcrypt, JWT sessions
//!
//! # Usage
//!
//! ```rust,no_run
//! use snapshare::backend::server::init::create_app;
//! use snapshare::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - `Option<T>` for lookups that may miss
//! - Custom error types in `shared::error`, `backend::store` and `backend::error`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
