use crate::domain::comment::NewComment;
use crate::domain::{Comment, DomainError};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stored with `active = true`.
    async fn create(&self, req: NewComment) -> Result<Comment, DomainError>;
    /// Active comments of the post, oldest first.
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    /// Every comment of the post including hidden ones, oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    async fn set_active(&self, id: i64, active: bool) -> Result<Comment, DomainError>;
}

fn comment_from_row(row: &PgRow) -> Result<Comment, DomainError> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        active: row.try_get("active")?,
    })
}

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, req: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO comments (post_id, name, email, body, created_at, updated_at, active)
            VALUES ($1, $2, $3, $4, NOW(), NOW(), TRUE)
            RETURNING id, post_id, name, email, body, created_at, updated_at, active
            "#,
        )
        .bind(req.post_id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create comment: {}", e);
            match e.as_database_error() {
                Some(db) if db.is_foreign_key_violation() => DomainError::PostNotFound,
                _ => DomainError::DatabaseError(e.to_string()),
            }
        })?;

        comment_from_row(&row)
    }

    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, name, email, body, created_at, updated_at, active
            FROM comments
            WHERE post_id = $1 AND active = TRUE
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.iter().map(comment_from_row).collect()
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, name, email, body, created_at, updated_at, active
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.iter().map(comment_from_row).collect()
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Comment, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE comments
            SET active = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, post_id, name, email, body, created_at, updated_at, active
            "#,
        )
        .bind(active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => comment_from_row(&row),
            None => Err(DomainError::CommentNotFound),
        }
    }
}
