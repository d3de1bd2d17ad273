use crate::domain::author::NewAuthor;
use crate::domain::{Author, DomainError};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn create(&self, req: NewAuthor) -> Result<Author, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Author, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Author, DomainError>;
}

fn author_from_row(row: &PgRow) -> Result<Author, DomainError> {
    Ok(Author {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, req: NewAuthor) -> Result<Author, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO authors (username, email, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create author: {}", e);
            match e.as_database_error() {
                Some(db) if db.is_unique_violation() => DomainError::AuthorAlreadyExists,
                _ => DomainError::DatabaseError(e.to_string()),
            }
        })?;

        author_from_row(&row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Author, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, created_at
            FROM authors
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => author_from_row(&row),
            None => Err(DomainError::AuthorNotFound),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Author, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, created_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => author_from_row(&row),
            None => Err(DomainError::AuthorNotFound),
        }
    }
}
