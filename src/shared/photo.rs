/**
 * Photo and Comment Data Structures
 *
 * This module defines the records the store persists and the JSON API
 * returns, plus the drafts clients submit to create them.
 *
 * A draft only becomes storable by passing validation: `PhotoDraft::validate`
 * yields a `NewPhoto` and `CommentDraft::validate` yields a `NewComment`.
 * Store operations accept only the validated types, so nothing reaches
 * persistence without going through these checks.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Maximum length of a photo title
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum length of an image reference
pub const MAX_IMAGE_URL_LEN: usize = 2048;
/// Maximum length of a photo description
pub const MAX_DESCRIPTION_LEN: usize = 2000;
/// Maximum length of a comment body
pub const MAX_COMMENT_LEN: usize = 1000;

/// A stored photo
///
/// `comments` holds references to comment records in display order. The
/// list only ever grows; `version` counts the appends made to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    /// Generated identifier
    pub id: Uuid,
    /// Title shown above the image
    pub title: String,
    /// Absolute http(s) URL or site-relative path of the image
    pub image_url: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Owned comment references, oldest first
    pub comments: Vec<Uuid>,
    /// Number of comment appends applied to this record
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A stored comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Generated identifier
    pub id: Uuid,
    /// Comment text
    pub body: String,
    /// Username of the poster, when the comment was made from a session
    pub author: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A photo with its comment references resolved
///
/// A reference whose comment record is missing is kept as `None` (`null` in
/// JSON) rather than failing the whole read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoWithComments {
    /// Generated identifier
    pub id: Uuid,
    /// Title shown above the image
    pub title: String,
    /// Absolute http(s) URL or site-relative path of the image
    pub image_url: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Resolved comments, oldest first
    pub comments: Vec<Option<Comment>>,
    /// Number of comment appends applied to this record
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl PhotoWithComments {
    /// Join a photo with the comments its references point at
    ///
    /// `lookup` is consulted once per reference, in order.
    pub fn populate(photo: Photo, mut lookup: impl FnMut(&Uuid) -> Option<Comment>) -> Self {
        let comments = photo.comments.iter().map(|id| lookup(id)).collect();
        Self {
            id: photo.id,
            title: photo.title,
            image_url: photo.image_url,
            description: photo.description,
            comments,
            version: photo.version,
            created_at: photo.created_at,
        }
    }
}

/// Photo attributes as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoDraft {
    /// Title shown above the image (required)
    #[serde(default)]
    pub title: Option<String>,
    /// Image reference (required)
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Photo attributes that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    title: String,
    image_url: String,
    description: Option<String>,
}

impl NewPhoto {
    /// Validated title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Validated image reference
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Validated description, `None` when blank or absent
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Build the record a store persists for this photo
    pub fn into_photo(self, id: Uuid, created_at: DateTime<Utc>) -> Photo {
        Photo {
            id,
            title: self.title,
            image_url: self.image_url,
            description: self.description,
            comments: Vec::new(),
            version: 0,
            created_at,
        }
    }
}

impl PhotoDraft {
    /// Validate the draft and produce storable attributes
    ///
    /// # Errors
    ///
    /// `SharedError::ValidationError` naming the first offending field.
    pub fn validate(self) -> Result<NewPhoto, SharedError> {
        let title = required("title", self.title, MAX_TITLE_LEN)?;
        let image_url = required("image_url", self.image_url, MAX_IMAGE_URL_LEN)?;
        if !is_image_reference(&image_url) {
            return Err(SharedError::validation(
                "image_url",
                "Image URL must start with http://, https:// or /",
            ));
        }
        let description = optional("description", self.description, MAX_DESCRIPTION_LEN)?;

        Ok(NewPhoto {
            title,
            image_url,
            description,
        })
    }
}

/// Comment attributes as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentDraft {
    /// Comment text (required)
    #[serde(default)]
    pub body: Option<String>,
}

/// Comment attributes that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    body: String,
    author: Option<String>,
}

impl NewComment {
    /// Validated body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Poster's username, if any
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Record the username of the poster
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Build the record a store persists for this comment
    pub fn into_comment(self, id: Uuid, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            body: self.body,
            author: self.author,
            created_at,
        }
    }
}

impl CommentDraft {
    /// Validate the draft and produce storable attributes
    ///
    /// # Errors
    ///
    /// `SharedError::ValidationError` if the body is missing, blank or too long.
    pub fn validate(self) -> Result<NewComment, SharedError> {
        let body = required("body", self.body, MAX_COMMENT_LEN)?;
        Ok(NewComment { body, author: None })
    }
}

fn required(field: &str, value: Option<String>, max_len: usize) -> Result<String, SharedError> {
    match optional(field, value, max_len)? {
        Some(value) => Ok(value),
        None => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}

fn optional(field: &str, value: Option<String>, max_len: usize) -> Result<Option<String>, SharedError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max_len {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max_len),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

fn is_image_reference(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("http://")
        || (url.starts_with('/') && !url.starts_with("//"))
}
