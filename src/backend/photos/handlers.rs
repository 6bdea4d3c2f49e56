/**
 * Photo and Comment Handlers
 *
 * JSON handlers for the photo API:
 *
 * - `GET /api/photos` - every photo, oldest first
 * - `POST /api/photos` - create a photo from a `PhotoDraft`
 * - `GET /api/photos/{id}` - one photo with its comments populated
 * - `POST /api/photos/{id}/comments` - create a comment and attach it
 *
 * # Comment Attachment
 *
 * `create_comment` validates the body and then makes a single store call,
 * `PhotoStore::create_comment`, which creates the comment and appends its
 * reference to the photo as one unit. When the photo does not exist the
 * store persists nothing and the handler answers 404; the comment is only
 * returned once it is attached.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::middleware::session::CurrentUser;
use crate::backend::store::{PhotoStore, Store};
use crate::shared::error::parse_id;
use crate::shared::{Comment, CommentDraft, Photo, PhotoDraft, PhotoWithComments};

/// Body of `GET /api/photos`
#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoList {
    pub photos: Vec<Photo>,
}

/// List all photos
pub async fn list_photos(State(store): State<Arc<dyn Store>>) -> Result<Json<PhotoList>, BackendError> {
    let photos = store.list_photos().await?;
    tracing::debug!("Listing {} photos", photos.len());
    Ok(Json(PhotoList { photos }))
}

/// Create a photo
///
/// # Errors
///
/// * `400 Bad Request` - missing title or image URL, bad URL, field too long
pub async fn create_photo(
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<PhotoDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Photo>), BackendError> {
    let Json(draft) = payload?;
    let photo = store.create_photo(draft.validate()?).await?;

    tracing::info!("Photo created: {} ({})", photo.title, photo.id);
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Get one photo with populated comments
///
/// # Errors
///
/// * `400 Bad Request` - the id is not a UUID
/// * `404 Not Found` - no such photo
pub async fn get_photo(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<String>,
) -> Result<Json<PhotoWithComments>, BackendError> {
    let id = parse_id(&id)?;
    let photo = store
        .find_photo_with_comments(id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Photo {} not found", id)))?;

    Ok(Json(photo))
}

/// Create a comment on a photo
///
/// The comment records the session user's name as its author when the
/// caller is logged in.
///
/// # Errors
///
/// * `400 Bad Request` - malformed id, or blank / overlong body
/// * `404 Not Found` - no such photo; no comment is stored
pub async fn create_comment(
    State(store): State<Arc<dyn Store>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<CommentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let photo_id = parse_id(&id)?;
    let Json(draft) = payload?;
    let comment = draft.validate()?.with_author(user.map(|u| u.username));

    let comment = store.create_comment(photo_id, comment).await?;

    tracing::info!("Comment {} attached to photo {}", comment.id, photo_id);
    Ok((StatusCode::CREATED, Json(comment)))
}
