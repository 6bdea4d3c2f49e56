/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username format and password length
 * 2. Check the username is free
 * 3. Hash password using bcrypt
 * 4. Create the user in the store
 * 5. Start a session and return its token and the user
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Json, Response},
};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::users::register;
use crate::backend::error::BackendError;
use crate::backend::middleware::session::{set_cookie, SESSION_COOKIE};
use crate::backend::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - username or password fails validation
/// * `409 Conflict` - username already taken
/// * `500 Internal Server Error` - hashing, storage or token signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "securepassword123" }
/// ```
pub async fn signup(
    State(app_state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Signup request for username: {}", request.username);

    let user = register(
        &*app_state.store,
        &request.username,
        &request.password,
        app_state.bcrypt_cost,
    )
    .await?;

    let token = app_state.sessions.issue(&user)?;
    let cookie = set_cookie(SESSION_COOKIE, &token, app_state.sessions.ttl_secs());

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    )
        .into_response())
}
