/**
 * Page Routes
 *
 * This module registers the server-rendered HTML routes.
 *
 * - `GET /` - Photo list
 * - `GET|POST /signup` - Registration form and submission
 * - `GET|POST /login` - Login form and submission
 * - `GET /logout` - End the session and return home
 * - `GET /profile` - Logged-in user's page
 * - `POST /photos` - Create a photo from a form
 * - `GET /photos/{id}` - Photo detail page
 * - `POST /photos/{id}/comments` - Comment from a form
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::pages::handlers::{
    create_comment_form, create_photo_form, index, login_form, login_submit, logout, photo_detail,
    profile, signup_form, signup_submit,
};
use crate::backend::server::state::AppState;

pub fn configure_page_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(index))
        .route("/signup", get(signup_form).post(signup_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .route("/photos", post(create_photo_form))
        .route("/photos/{id}", get(photo_detail))
        .route("/photos/{id}/comments", post(create_comment_form))
}
