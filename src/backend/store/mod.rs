//! Store Module
//!
//! Persistence for users, photos and comments behind three traits, with two
//! backends implementing all of them:
//!
//! - **`memory`** - `MemoryStore`, process-local collections behind one
//!   `tokio::sync::RwLock`. Used when no database is configured and in tests.
//! - **`postgres`** - `PgStore`, a sqlx `PgPool` with the schema in
//!   `migrations/`.
//!
//! # Atomicity
//!
//! `PhotoStore::create_comment` and `PhotoStore::append_comment` are the only
//! operations that modify an existing photo. Both backends apply them as a
//! single unit: the memory store under one write lock, PostgreSQL inside one
//! transaction with a row-locking `UPDATE`. A comment is never persisted
//! without being attached, and concurrent appends never overwrite each other.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::{Comment, NewComment, NewPhoto, Photo, PhotoWithComments};

/// In-memory backend
pub mod memory;

/// PostgreSQL backend
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors returned by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record addressed by id does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// Identifier that missed
        id: Uuid,
    },

    /// The username is already registered
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// The comment is already referenced by a photo
    #[error("comment {comment} is already attached to a photo")]
    AlreadyAttached {
        /// Comment that was offered a second time
        comment: Uuid,
    },

    /// The backend failed (connectivity, query, constraint, ...)
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Create a not-found error for a photo
    pub fn photo_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "photo", id }
    }

    /// Create a not-found error for a comment
    pub fn comment_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "comment", id }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Account records
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new account
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateUsername` if the username is already taken.
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Look up an account by username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Look up an account by id
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Photo records and the comment attachment protocol
#[async_trait]
pub trait PhotoStore: Send + Sync + 'static {
    /// All photos, oldest first
    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError>;

    /// Persist a validated photo and return the stored record
    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, StoreError>;

    /// Look up a photo by id
    async fn find_photo(&self, id: Uuid) -> Result<Option<Photo>, StoreError>;

    /// Look up a photo by id with its comment references resolved
    ///
    /// References to missing comments resolve to `None`.
    async fn find_photo_with_comments(&self, id: Uuid) -> Result<Option<PhotoWithComments>, StoreError>;

    /// Append a reference to an existing comment and persist the photo
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - the photo or the comment does not exist
    /// * `StoreError::AlreadyAttached` - some photo already references the comment
    async fn append_comment(&self, photo_id: Uuid, comment_id: Uuid) -> Result<Photo, StoreError>;

    /// Create a comment and attach it to a photo as one unit
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the photo does not exist; nothing is
    /// persisted in that case.
    async fn create_comment(&self, photo_id: Uuid, comment: NewComment) -> Result<Comment, StoreError>;
}

/// Comment records
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    /// Persist a comment without attaching it to any photo
    ///
    /// The result is an orphan until `PhotoStore::append_comment` references
    /// it; handlers use `PhotoStore::create_comment` instead.
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// Look up a comment by id
    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError>;
}

/// Everything the application needs from persistence
pub trait Store: UserStore + PhotoStore + CommentStore {}

impl<T> Store for T where T: UserStore + PhotoStore + CommentStore {}
