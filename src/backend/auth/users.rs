/**
 * User Model and Account Operations
 *
 * This module defines the account record and the two operations built on it:
 * registration and password authentication. Persistence goes through the
 * `UserStore` trait so the same code runs against PostgreSQL and the
 * in-memory store.
 *
 * # Passwords
 *
 * Passwords are hashed with bcrypt at the configured cost. Hashing and
 * verification are CPU-bound, so both run on tokio's blocking pool.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::{StoreError, UserStore};
use crate::shared::SharedError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Message returned for every failed login, whatever the cause
pub const AUTH_FAILURE_MESSAGE: &str = "Invalid username or password";

/// User struct representing a stored account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Hashed password (bcrypt, salt embedded)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Errors from registration, authentication and session handling
#[derive(Debug, Error)]
pub enum AuthError {
    /// Submitted credentials are malformed
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// The username is already registered
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Unknown user or wrong password
    #[error("{}", AUTH_FAILURE_MESSAGE)]
    AuthFailure,

    /// The session token is malformed, expired, revoked or names a missing user
    #[error("session is invalid or has expired")]
    SessionInvalid,

    /// bcrypt failed or its worker task died
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A session token could not be signed
    #[error("token error: {0}")]
    Token(String),

    /// The store failed
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            other => Self::Store(other),
        }
    }
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_credentials(username: &str, password: &str) -> Result<(), SharedError> {
    if !is_valid_username(username) {
        return Err(SharedError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Register a new account
///
/// # Errors
///
/// * `AuthError::Validation` - username or password malformed
/// * `AuthError::DuplicateUsername` - username taken, checked before hashing
///   and again by the store's uniqueness rule
/// * `AuthError::Hashing` / `AuthError::Store` - server-side failures
pub async fn register<S>(store: &S, username: &str, password: &str, cost: u32) -> Result<User, AuthError>
where
    S: UserStore + ?Sized,
{
    validate_credentials(username, password)?;

    if store.find_user_by_username(username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(AuthError::DuplicateUsername(username.to_string()));
    }

    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    let user = store.insert_user(username, &password_hash).await?;
    tracing::info!("User created: {} ({})", user.username, user.id);
    Ok(user)
}

/// Check a username/password pair
///
/// Unknown usernames and wrong passwords both yield `AuthError::AuthFailure`.
pub async fn authenticate<S>(store: &S, username: &str, password: &str) -> Result<User, AuthError>
where
    S: UserStore + ?Sized,
{
    let Some(user) = store.find_user_by_username(username).await? else {
        tracing::warn!("Login for unknown user: {}", username);
        return Err(AuthError::AuthFailure);
    };

    let password = password.to_string();
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", username);
        return Err(AuthError::AuthFailure);
    }

    Ok(user)
}
