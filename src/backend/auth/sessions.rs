/**
 * Session Management and JWT Tokens
 *
 * This module handles session tokens and one-shot flash messages.
 *
 * A session token is an HS256 JWT carrying the user id, username and a
 * random session id. Tokens are stateless except for logout: revoking a
 * token records its session id until the token would have expired anyway,
 * and `resolve` rejects it from then on.
 *
 * Flash messages live for `FLASH_TTL_SECS`, the lifetime of the cookie that
 * carries their key. Expired messages cannot be read and are dropped the next
 * time a message is stored.
 *
 * The `SessionStore` is built from configuration and shared through the
 * application state. Clones share the same revocation list and flash map.
 */

use jsonwebtoken::{decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::{AuthError, User};
use crate::shared::AppConfig;

/// Lifetime of a flash message, in seconds
pub const FLASH_TTL_SECS: u64 = 300;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Username at the time the session started
    pub username: String,
    /// Session ID, the revocation key
    pub sid: Uuid,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

struct SessionInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
    flash_ttl_secs: u64,
    /// Revoked session ids with the expiry of their token
    revoked: RwLock<HashMap<Uuid, u64>>,
    /// Flash messages with their expiry
    flashes: RwLock<HashMap<Uuid, (String, u64)>>,
}

/// Issues, verifies and revokes session tokens; holds flash messages
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl_secs", &self.inner.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store signing with `secret`; tokens live for `ttl_hours`
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        Self::with_flash_ttl(secret, ttl_hours, FLASH_TTL_SECS)
    }

    fn with_flash_ttl(secret: &str, ttl_hours: u64, flash_ttl_secs: u64) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                ttl_secs: ttl_hours.saturating_mul(60 * 60),
                flash_ttl_secs,
                revoked: RwLock::new(HashMap::new()),
                flashes: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a store from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.session_secret, config.session_ttl_hours)
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.inner.ttl_secs
    }

    /// Flash message lifetime in seconds
    pub fn flash_ttl_secs(&self) -> u64 {
        self.inner.flash_ttl_secs
    }

    /// Start a session for `user` and return its signed token
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            sid: Uuid::new_v4(),
            iat: now,
            exp: now.saturating_add(self.inner.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Verify a token's signature, expiry and revocation status
    pub async fn resolve(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.inner.decoding, &validation)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                AuthError::SessionInvalid
            })?
            .claims;

        if self.inner.revoked.read().await.contains_key(&claims.sid) {
            tracing::debug!("Rejected revoked session {}", claims.sid);
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }

    /// End the session described by `claims`
    ///
    /// Entries whose tokens have expired are dropped at the same time.
    pub async fn revoke(&self, claims: &Claims) {
        let now = get_current_timestamp();
        let mut revoked = self.inner.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.sid, claims.exp);
    }

    /// Store a flash message and return the key to read it back with
    ///
    /// Expired messages are dropped at the same time.
    pub async fn put_flash(&self, message: impl Into<String>) -> Uuid {
        let key = Uuid::new_v4();
        let now = get_current_timestamp();
        let mut flashes = self.inner.flashes.write().await;
        flashes.retain(|_, (_, exp)| *exp > now);
        flashes.insert(key, (message.into(), now.saturating_add(self.inner.flash_ttl_secs)));
        key
    }

    /// Read and remove a flash message; expired messages read as `None`
    pub async fn take_flash(&self, key: Uuid) -> Option<String> {
        let (message, exp) = self.inner.flashes.write().await.remove(&key)?;
        (exp > get_current_timestamp()).then_some(message)
    }
}
