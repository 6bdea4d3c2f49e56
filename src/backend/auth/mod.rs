//! Authentication Module
//!
//! This module handles user registration, authentication and session
//! management.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, register and authenticate
//! ├── sessions.rs     - Session tokens, revocation and flash messages
//! └── handlers/       - JSON HTTP handlers
//! ```
//!
//! # Session Lifecycle
//!
//! ```text
//! Anonymous --signup/login--> Authenticated --logout/expiry--> Anonymous
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session tokens are HS256 JWTs signed with the configured secret
//! - Logout revokes the token server-side
//! - Invalid credentials return 401 (no information leakage)

/// User model and account operations
pub mod users;

/// Session tokens and flash messages
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, logout, signup};
pub use sessions::{Claims, SessionStore};
pub use users::{authenticate, register, AuthError, User};
