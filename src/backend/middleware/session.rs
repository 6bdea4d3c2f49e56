/**
 * Session Middleware
 *
 * This module resolves who is making each request. `session_middleware`
 * runs in front of every route; it looks for a session token, verifies it
 * with the `SessionStore`, loads the user and stores the outcome in the
 * request extensions as a `Session`. It never rejects a request itself;
 * handlers decide what an anonymous caller may do by choosing an extractor:
 *
 * - `Session` - the raw outcome, used by logout to revoke the token
 * - `CurrentUser` - `Option<User>`, for pages that render either way
 * - `AuthUser` - a `User`, rejecting anonymous callers with 401
 *
 * # Token Sources
 *
 * 1. `Authorization: Bearer <token>` (JSON API clients)
 * 2. The `snapshare_session` cookie (browsers)
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::Claims;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::UserStore;

/// Cookie holding the session token
pub const SESSION_COOKIE: &str = "snapshare_session";

/// Cookie holding the key of a pending flash message
pub const FLASH_COOKIE: &str = "snapshare_flash";

/// Identity of the caller, resolved once per request
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// No token, or a token that failed verification
    #[default]
    Anonymous,
    /// A verified session for an existing user
    Authenticated {
        /// The logged-in user
        user: User,
        /// Claims of the presented token
        claims: Claims,
    },
}

impl Session {
    /// The logged-in user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user, .. } => Some(user),
        }
    }
}

/// Resolve the request's session token into a `Session` extension
pub async fn session_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match session_token(request.headers()) {
        Some(token) => resolve_session(&app_state, &token).await,
        None => Session::Anonymous,
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

async fn resolve_session(app_state: &AppState, token: &str) -> Session {
    let claims = match app_state.sessions.resolve(token).await {
        Ok(claims) => claims,
        Err(_) => return Session::Anonymous,
    };

    match app_state.store.find_user_by_id(claims.sub).await {
        Ok(Some(user)) => Session::Authenticated { user, claims },
        Ok(None) => {
            tracing::warn!("Session {} names unknown user {}", claims.sid, claims.sub);
            Session::Anonymous
        }
        Err(e) => {
            tracing::error!("Failed to load session user {}: {}", claims.sub, e);
            Session::Anonymous
        }
    }
}

/// Find the session token in the request headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer.or_else(|| cookie_value(headers, SESSION_COOKIE))
}

/// Find the pending flash key in the request cookies
pub fn flash_key(headers: &HeaderMap) -> Option<Uuid> {
    cookie_value(headers, FLASH_COOKIE).and_then(|raw| Uuid::parse_str(&raw).ok())
}

/// Read one cookie from the `Cookie` request headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `value` under `name` for `max_age_secs`
pub fn set_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age_secs
    )
}

/// `Set-Cookie` value that deletes the cookie `name`
pub fn clear_cookie(name: &str) -> String {
    set_cookie(name, "", 0)
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// The logged-in user, or `None` for anonymous callers
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<Session>().and_then(|s| s.user().cloned());
        Ok(CurrentUser(user))
    }
}

/// The logged-in user; anonymous callers are rejected with 401
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .and_then(|s| s.user().cloned())
            .map(AuthUser)
            .ok_or_else(|| BackendError::unauthorized("Authentication required"))
    }
}
