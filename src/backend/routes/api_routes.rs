/**
 * API Routes
 *
 * This module registers the JSON endpoints.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - End the current session
 * - `GET /api/auth/me` - Get current user info
 *
 * ## Photos
 * - `GET /api/photos` - List photos
 * - `POST /api/photos` - Create a photo
 * - `GET /api/photos/{id}` - Photo with populated comments
 * - `POST /api/photos/{id}/comments` - Create and attach a comment
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, signup};
use crate::backend::photos::{create_comment, create_photo, get_photo, list_photos};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(get_me))
        // Photo endpoints
        .route("/api/photos", get(list_photos).post(create_photo))
        .route("/api/photos/{id}", get(get_photo))
        .route("/api/photos/{id}/comments", post(create_comment))
}
