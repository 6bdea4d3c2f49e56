//! Authentication Handlers Module
//!
//! This module contains the JSON HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Current user and logout handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - End the current session
//! - **`get_me`** - GET /api/auth/me - Get current user info
//!
//! Signup and login return the token in the body and also set it as the
//! `snapshare_session` cookie, so browsers and API clients share one flow.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Current user and logout handlers
pub mod me;

pub use types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

pub use login::login;
pub use me::{get_me, logout};
pub use signup::signup;
