/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown users and wrong passwords return the same 401 response
 * - User passwords are never returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Json, Response},
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::users::authenticate;
use crate::backend::error::BackendError;
use crate::backend::middleware::session::{set_cookie, SESSION_COOKIE};
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token generation fails
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Login request for: {}", request.username);

    let user = authenticate(&*app_state.store, &request.username, &request.password).await?;
    let token = app_state.sessions.issue(&user)?;
    let cookie = set_cookie(SESSION_COOKIE, &token, app_state.sessions.ttl_secs());

    tracing::info!("User logged in successfully: {}", user.username);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    )
        .into_response())
}
