/**
 * PostgreSQL Store Backend
 *
 * This module implements the store traits on a sqlx `PgPool`. The schema
 * lives in `migrations/` and is applied at startup by
 * `backend::server::config::load_store`.
 *
 * # Schema
 *
 * - `users (id, username UNIQUE, password_hash, created_at)`
 * - `photos (id, title, image_url, description, comment_ids UUID[], version, created_at)`
 * - `comments (id, body, author, created_at)`
 *
 * # Comment Attachment
 *
 * `create_comment` inserts the comment and appends its id to
 * `photos.comment_ids` inside one transaction. The append is a single
 * `UPDATE ... array_append(...)`, which takes the row lock, so concurrent
 * appends to the same photo queue behind each other instead of overwriting.
 * If the photo does not exist the transaction is rolled back and the comment
 * is discarded.
 *
 * `append_comment` attaches a comment that already exists. It locks the
 * comment row first, so two appends of the same comment cannot both pass the
 * "not yet attached" check.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{CommentStore, PhotoStore, StoreError, UserStore};
use crate::backend::auth::users::User;
use crate::shared::{Comment, NewComment, NewPhoto, Photo, PhotoWithComments};

const PHOTO_COLUMNS: &str = "id, title, image_url, description, comment_ids, version, created_at";

/// Photo row as stored in the `photos` table
#[derive(Debug, sqlx::FromRow)]
struct PhotoRow {
    id: Uuid,
    title: String,
    image_url: String,
    description: Option<String>,
    comment_ids: Vec<Uuid>,
    version: i64,
    created_at: DateTime<Utc>,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            description: row.description,
            comments: row.comment_ids,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

/// Comment row as stored in the `comments` table
#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    body: String,
    author: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            body: row.body,
            author: row.author,
            created_at: row.created_at,
        }
    }
}

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an already-migrated pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl PhotoStore for PgStore {
    async fn list_photos(&self) -> Result<Vec<Photo>, StoreError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {} FROM photos ORDER BY created_at, id",
            PHOTO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn create_photo(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (id, title, image_url, description, comment_ids, version, created_at)
            VALUES ($1, $2, $3, $4, '{{}}', 0, $5)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(photo.title())
        .bind(photo.image_url())
        .bind(photo.description())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_photo(&self, id: Uuid) -> Result<Option<Photo>, StoreError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {} FROM photos WHERE id = $1",
            PHOTO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Photo::from))
    }

    async fn find_photo_with_comments(&self, id: Uuid) -> Result<Option<PhotoWithComments>, StoreError> {
        let Some(photo) = self.find_photo(id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, body, author, created_at
            FROM comments
            WHERE id = ANY($1)
            "#,
        )
        .bind(photo.comments.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<Uuid, Comment> = rows
            .into_iter()
            .map(|row| (row.id, Comment::from(row)))
            .collect();

        Ok(Some(PhotoWithComments::populate(photo, |comment_id| {
            by_id.get(comment_id).cloned()
        })))
    }

    async fn append_comment(&self, photo_id: Uuid, comment_id: Uuid) -> Result<Photo, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Appenders of the same comment queue on this lock
        let comment: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM comments WHERE id = $1 FOR UPDATE")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?;
        if comment.is_none() {
            tx.rollback().await?;
            return Err(StoreError::comment_not_found(comment_id));
        }

        let attached: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM photos WHERE $1 = ANY(comment_ids) LIMIT 1")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?;
        if attached.is_some() {
            tx.rollback().await?;
            return Err(StoreError::AlreadyAttached { comment: comment_id });
        }

        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            UPDATE photos
            SET comment_ids = array_append(comment_ids, $1), version = version + 1
            WHERE id = $2
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(comment_id)
        .bind(photo_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Err(StoreError::photo_not_found(photo_id));
        };

        tx.commit().await?;
        Ok(row.into())
    }

    async fn create_comment(&self, photo_id: Uuid, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = comment.into_comment(Uuid::new_v4(), Utc::now());
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO comments (id, body, author, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(comment.id)
        .bind(&comment.body)
        .bind(&comment.author)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE photos
            SET comment_ids = array_append(comment_ids, $1), version = version + 1
            WHERE id = $2
            "#,
        )
        .bind(comment.id)
        .bind(photo_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::photo_not_found(photo_id));
        }

        tx.commit().await?;
        Ok(comment)
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = comment.into_comment(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO comments (id, body, author, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(comment.id)
        .bind(&comment.body)
        .bind(&comment.author)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, body, author, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }
}
