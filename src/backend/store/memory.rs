//! In-memory store backend.
//!
//! Keeps users, photos and comments in process memory behind a single
//! `tokio::sync::RwLock`. Nothing survives a restart. Used when no database is
//! configured, and by the test suite.
//!
//! Because all three collections sit behind the same lock, operations that
//! touch a photo and a comment together (`create_comment`, `append_comment`)
//! run with one write guard and are atomic with respect to every other
//! request. That includes the check that a comment is attached only once.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CommentStore, PhotoStore, StoreError, UserStore};
use crate::backend::auth::users::User;
use crate::shared::{Comment, NewComment, NewPhoto, Photo, PhotoWithComments};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    usernames: HashMap<String, Uuid>,
    photos: HashMap<Uuid, Photo>,
    /// Photo ids in creation order
    photo_order: Vec<Uuid>,
    comments: HashMap<Uuid, Comment>,
}

/// Process-local store implementing every store trait
///
/// `MemoryStore` is `Clone`; clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored comments, attached or not.
    pub async fn comment_count(&self) -> usize {
        self.inner.read().await.comments.len()
    }

    /// Removes a comment record, leaving any references to it dangling.
    ///
    /// Comments are never deleted by the application; this exists so the
    /// placeholder behavior of populated reads can be exercised.
    pub async fn remove_comment(&self, id: Uuid) -> Option<Comment> {
        self.inner.write().await.comments.remove(&id)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut data = self.inner.write().await;
        if data.usernames.contains_key(username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        data.usernames.insert(user.username.clone(), user.id);
        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let data = self.inner.read().await;
        Ok(data
            .usernames
            .get(username)
            .and_then(|id| data.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError> {
        let data = self.inner.read().await;
        Ok(data
            .photo_order
            .iter()
            .filter_map(|id| data.photos.get(id))
            .cloned()
            .collect())
    }

    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let photo = photo.into_photo(Uuid::new_v4(), Utc::now());
        let mut data = self.inner.write().await;
        data.photo_order.push(photo.id);
        data.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn find_photo(&self, id: Uuid) -> Result<Option<Photo>, StoreError> {
        Ok(self.inner.read().await.photos.get(&id).cloned())
    }

    async fn find_photo_with_comments(&self, id: Uuid) -> Result<Option<PhotoWithComments>, StoreError> {
        let data = self.inner.read().await;
        Ok(data.photos.get(&id).cloned().map(|photo| {
            PhotoWithComments::populate(photo, |comment_id| data.comments.get(comment_id).cloned())
        }))
    }

    async fn append_comment(&self, photo_id: Uuid, comment_id: Uuid) -> Result<Photo, StoreError> {
        let mut data = self.inner.write().await;
        if !data.comments.contains_key(&comment_id) {
            return Err(StoreError::comment_not_found(comment_id));
        }
        if data.photos.values().any(|p| p.comments.contains(&comment_id)) {
            return Err(StoreError::AlreadyAttached { comment: comment_id });
        }
        let photo = data
            .photos
            .get_mut(&photo_id)
            .ok_or_else(|| StoreError::photo_not_found(photo_id))?;

        photo.comments.push(comment_id);
        photo.version += 1;
        Ok(photo.clone())
    }

    async fn create_comment(&self, photo_id: Uuid, comment: NewComment) -> Result<Comment, StoreError> {
        let mut data = self.inner.write().await;
        let Collections { photos, comments, .. } = &mut *data;

        let photo = photos
            .get_mut(&photo_id)
            .ok_or_else(|| StoreError::photo_not_found(photo_id))?;

        let comment = comment.into_comment(Uuid::new_v4(), Utc::now());
        comments.insert(comment.id, comment.clone());
        photo.comments.push(comment.id);
        photo.version += 1;
        Ok(comment)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = comment.into_comment(Uuid::new_v4(), Utc::now());
        self.inner
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.inner.read().await.comments.get(&id).cloned())
    }
}
