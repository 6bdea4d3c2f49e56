/**
 * Current User and Logout Handlers
 *
 * GET /api/auth/me returns the user behind the presented session.
 * POST /api/auth/logout ends that session.
 *
 * Both rely on `session_middleware` having resolved the token (bearer
 * header or session cookie) before the handler runs.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Json},
};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::sessions::SessionStore;
use crate::backend::middleware::session::{clear_cookie, AuthUser, Session, SESSION_COOKIE};

/// Get current user handler
///
/// Anonymous callers are rejected with 401 by the `AuthUser` extractor.
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Logout handler
///
/// Revokes the presented session so its token stops working, and clears
/// the session cookie. Succeeds for anonymous callers too.
pub async fn logout(State(sessions): State<SessionStore>, session: Session) -> impl IntoResponse {
    if let Session::Authenticated { user, claims } = &session {
        sessions.revoke(claims).await;
        tracing::info!("User logged out: {}", user.username);
    }

    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE))]),
    )
}
