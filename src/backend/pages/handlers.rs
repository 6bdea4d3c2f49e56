/**
 * Page Handlers
 *
 * This module implements the server-rendered HTML routes: the photo list,
 * signup, login, logout, profile and photo detail pages, plus the form
 * posts that create photos and comments.
 *
 * # Flash Messages
 *
 * Form failures redirect back to the form with a one-shot message. The text
 * is kept in the `SessionStore`; the browser only holds its key in the
 * `snapshare_flash` cookie. The next page that renders reads the message,
 * which removes it, and clears the cookie.
 *
 * # Errors
 *
 * Handlers return `PageError`, which renders the backend error's status as
 * an HTML error page instead of the JSON body the API uses. The page is first
 * rendered for an anonymous caller; `render_error_pages` runs around every
 * route and re-renders it with the logged-in user's navigation.
 */

use axum::{
    body::Body,
    extract::{Form, Path, Request, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    middleware::Next,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::backend::auth::handlers::types::{LoginRequest, SignupRequest};
use crate::backend::auth::sessions::SessionStore;
use crate::backend::auth::users::{authenticate, register, AuthError, User, AUTH_FAILURE_MESSAGE};
use crate::backend::error::BackendError;
use crate::backend::middleware::session::{
    clear_cookie, flash_key, set_cookie, CurrentUser, Session, FLASH_COOKIE, SESSION_COOKIE,
};
use crate::backend::pages::views;
use crate::backend::server::state::AppState;
use crate::backend::store::{PhotoStore, StoreError};
use crate::shared::error::parse_id;
use crate::shared::{CommentDraft, PhotoDraft, SharedError};

/// Error from an HTML handler, rendered as an error page
#[derive(Debug)]
pub struct PageError(pub BackendError);

impl<E> From<E> for PageError
where
    E: Into<BackendError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!("Page failed: {} ({})", self.0, status);
        } else {
            tracing::warn!("Page failed: {} ({})", self.0, status);
        }

        let message = self.0.message();
        let page = views::error_page(status, None, &message);
        let mut response = (status, Html(page.into_string())).into_response();
        response.extensions_mut().insert(ErrorPage { status, message });
        response
    }
}

/// Marks a response as a rendered error page
#[derive(Debug, Clone)]
struct ErrorPage {
    status: StatusCode,
    message: String,
}

/// Re-render error pages for logged-in callers
pub async fn render_error_pages(
    CurrentUser(user): CurrentUser,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(user) = user else {
        return response;
    };
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let html = views::error_page(page.status, Some(&user), &page.message).into_string();
    Response::from_parts(parts, Body::from(html))
}

/// Read and consume the pending flash message, if any
async fn take_flash(sessions: &SessionStore, headers: &HeaderMap) -> Option<String> {
    match flash_key(headers) {
        Some(key) => sessions.take_flash(key).await,
        None => None,
    }
}

/// Render a page, clearing the flash cookie when a flash was shown
fn render(markup: Markup, had_flash: bool) -> Response {
    let html = Html(markup.into_string());
    if had_flash {
        (AppendHeaders([(SET_COOKIE, clear_cookie(FLASH_COOKIE))]), html).into_response()
    } else {
        html.into_response()
    }
}

async fn redirect_with_flash(sessions: &SessionStore, to: &str, message: impl Into<String>) -> Response {
    let key = sessions.put_flash(message).await;
    let cookie = set_cookie(FLASH_COOKIE, &key.to_string(), sessions.flash_ttl_secs());
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(to),
    )
        .into_response()
}

fn start_session(sessions: &SessionStore, user: &User) -> Result<Response, PageError> {
    let token = sessions.issue(user)?;
    Ok((
        AppendHeaders([(SET_COOKIE, set_cookie(SESSION_COOKIE, &token, sessions.ttl_secs()))]),
        Redirect::to("/profile"),
    )
        .into_response())
}

/// Text shown to the user for a rejected form
fn form_message(err: &SharedError) -> String {
    match err {
        SharedError::ValidationError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// GET / - photo list
pub async fn index(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let photos = app_state.store.list_photos().await?;
    let flash = take_flash(&app_state.sessions, &headers).await;

    Ok(render(
        views::index_page(user.as_ref(), &photos, flash.as_deref()),
        flash.is_some(),
    ))
}

/// GET /signup
pub async fn signup_form(
    State(sessions): State<SessionStore>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/profile").into_response();
    }

    let flash = take_flash(&sessions, &headers).await;
    render(views::signup_page(flash.as_deref()), flash.is_some())
}

/// POST /signup - register and log in
pub async fn signup_submit(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(request): Form<SignupRequest>,
) -> Result<Response, PageError> {
    if user.is_some() {
        return Ok(Redirect::to("/profile").into_response());
    }

    let result = register(
        &*app_state.store,
        &request.username,
        &request.password,
        app_state.bcrypt_cost,
    )
    .await;

    match result {
        Ok(user) => start_session(&app_state.sessions, &user),
        Err(AuthError::Validation(err)) => {
            Ok(redirect_with_flash(&app_state.sessions, "/signup", form_message(&err)).await)
        }
        Err(AuthError::DuplicateUsername(_)) => {
            Ok(redirect_with_flash(&app_state.sessions, "/signup", "Username already taken").await)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /login
pub async fn login_form(
    State(sessions): State<SessionStore>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/profile").into_response();
    }

    let flash = take_flash(&sessions, &headers).await;
    render(views::login_page(flash.as_deref()), flash.is_some())
}

/// POST /login
pub async fn login_submit(
    State(app_state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Response, PageError> {
    match authenticate(&*app_state.store, &request.username, &request.password).await {
        Ok(user) => {
            tracing::info!("User logged in successfully: {}", user.username);
            start_session(&app_state.sessions, &user)
        }
        Err(AuthError::AuthFailure) => {
            Ok(redirect_with_flash(&app_state.sessions, "/login", AUTH_FAILURE_MESSAGE).await)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /logout
pub async fn logout(State(sessions): State<SessionStore>, session: Session) -> Response {
    if let Session::Authenticated { user, claims } = &session {
        sessions.revoke(claims).await;
        tracing::info!("User logged out: {}", user.username);
    }

    (
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE))]),
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /profile
pub async fn profile(CurrentUser(user): CurrentUser) -> Response {
    match user {
        Some(user) => Html(views::profile_page(&user).into_string()).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

/// GET /photos/{id}
pub async fn photo_detail(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let photo = app_state
        .store
        .find_photo_with_comments(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Photo not found"))?;
    let flash = take_flash(&app_state.sessions, &headers).await;

    Ok(render(
        views::photo_page(user.as_ref(), &photo, flash.as_deref()),
        flash.is_some(),
    ))
}

/// POST /photos - form variant of photo creation
pub async fn create_photo_form(
    State(app_state): State<AppState>,
    Form(draft): Form<PhotoDraft>,
) -> Result<Response, PageError> {
    let photo = match draft.validate() {
        Ok(photo) => photo,
        Err(err) => return Ok(redirect_with_flash(&app_state.sessions, "/", form_message(&err)).await),
    };

    let photo = app_state.store.create_photo(photo).await?;
    tracing::info!("Photo created: {} ({})", photo.title, photo.id);
    Ok(Redirect::to(&format!("/photos/{}", photo.id)).into_response())
}

/// POST /photos/{id}/comments - form variant of comment creation
pub async fn create_comment_form(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Form(draft): Form<CommentDraft>,
) -> Result<Response, PageError> {
    let photo_id = parse_id(&id)?;
    let back = format!("/photos/{}", photo_id);

    let comment = match draft.validate() {
        Ok(comment) => comment.with_author(user.map(|u| u.username)),
        Err(err) => return Ok(redirect_with_flash(&app_state.sessions, &back, form_message(&err)).await),
    };

    match app_state.store.create_comment(photo_id, comment).await {
        Ok(comment) => {
            tracing::info!("Comment {} attached to photo {}", comment.id, photo_id);
            Ok(Redirect::to(&back).into_response())
        }
        Err(StoreError::NotFound { .. }) => Err(BackendError::not_found("Photo not found").into()),
        Err(err) => Err(err.into()),
    }
}
