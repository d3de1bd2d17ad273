use crate::domain::post::{publish_day_bounds, slugify, NewPost};
use crate::domain::{DomainError, Post, PostStatus};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, req: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Post, DomainError>;
    /// Published post whose UTC publish date and slug match.
    async fn find_published(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError>;
    /// Published posts, newest `publish` first.
    async fn list_published(&self) -> Result<Vec<Post>, DomainError>;
    /// Every post regardless of status, newest `publish` first.
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn slug_taken(
        &self,
        slug: &str,
        date: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<bool, DomainError>;
    async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, DomainError>;
    /// Comments of the post go with it.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.subtitle, p.slug, p.author_id, a.username AS author,
           p.image, p.body, p.publish, p.created_at, p.updated_at, p.status
    FROM posts p
    JOIN authors a ON a.id = p.author_id
"#;

fn post_from_row(row: &PgRow) -> Result<Post, DomainError> {
    let status: String = row.try_get("status")?;
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        subtitle: row.try_get("subtitle")?,
        slug: row.try_get("slug")?,
        author_id: row.try_get("author_id")?,
        author: row.try_get("author")?,
        image: row.try_get("image")?,
        body: row.try_get("body")?,
        publish: row.try_get("publish")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        status: status.parse()?,
    })
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, DomainError> {
        let sql = format!(
            "{} WHERE ($1::TEXT IS NULL OR p.status = $1) ORDER BY p.publish DESC",
            SELECT_POST
        );

        let rows = sqlx::query(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.iter().map(post_from_row).collect()
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, req: NewPost) -> Result<Post, DomainError> {
        let slug = req.slug.unwrap_or_else(|| slugify(&req.title));
        let publish = req.publish.unwrap_or_else(Utc::now);

        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO posts
                    (title, subtitle, slug, author_id, image, body, publish, status,
                     created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
                RETURNING *
            )
            SELECT i.id, i.title, i.subtitle, i.slug, i.author_id, a.username AS author,
                   i.image, i.body, i.publish, i.created_at, i.updated_at, i.status
            FROM inserted i
            JOIN authors a ON a.id = i.author_id
            "#,
        )
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&slug)
        .bind(req.author_id)
        .bind(&req.image)
        .bind(&req.body)
        .bind(publish)
        .bind(req.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {}", e);
            match e.as_database_error() {
                Some(db) if db.is_unique_violation() => DomainError::SlugTaken {
                    slug: slug.clone(),
                    date: publish.date_naive(),
                },
                Some(db) if db.is_foreign_key_violation() => DomainError::AuthorNotFound,
                _ => DomainError::DatabaseError(e.to_string()),
            }
        })?;

        post_from_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, DomainError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_POST);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => post_from_row(&row),
            None => Err(DomainError::PostNotFound),
        }
    }

    async fn find_published(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError> {
        let Some((start, end)) = publish_day_bounds(year, month, day) else {
            return Err(DomainError::PostNotFound);
        };

        let sql = format!(
            "{} WHERE p.status = $1 AND p.slug = $2 AND p.publish >= $3 AND p.publish < $4",
            SELECT_POST
        );

        let rows = sqlx::query(&sql)
            .bind(PostStatus::Published.as_str())
            .bind(slug)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        // The unique index rules out more than one match.
        match rows.as_slice() {
            [row] => post_from_row(row),
            _ => Err(DomainError::PostNotFound),
        }
    }

    async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        self.fetch_list(Some(PostStatus::Published)).await
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.fetch_list(None).await
    }

    async fn slug_taken(
        &self,
        slug: &str,
        date: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let Some((start, end)) = publish_day_bounds(date.year(), date.month(), date.day()) else {
            return Ok(false);
        };

        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM posts
                WHERE slug = $1 AND publish >= $2 AND publish < $3
                  AND ($4::BIGINT IS NULL OR id <> $4)
            ) AS taken
            "#,
        )
        .bind(slug)
        .bind(start)
        .bind(end)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(row.try_get("taken")?)
    }

    async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, DomainError> {
        let row = sqlx::query(
            r#"
            WITH updated AS (
                UPDATE posts
                SET status = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING *
            )
            SELECT u.id, u.title, u.subtitle, u.slug, u.author_id, a.username AS author,
                   u.image, u.body, u.publish, u.created_at, u.updated_at, u.status
            FROM updated u
            JOIN authors a ON a.id = u.author_id
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => post_from_row(&row),
            None => Err(DomainError::PostNotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            Err(DomainError::PostNotFound)
        } else {
            Ok(())
        }
    }
}
