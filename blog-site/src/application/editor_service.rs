use crate::data::{AuthorRepository, CommentRepository, PostRepository};
use crate::domain::author::NewAuthor;
use crate::domain::post::{slugify, NewPost};
use crate::domain::{Author, Comment, DomainError, Post, PostStatus};
use chrono::Utc;
use std::sync::Arc;

/// Author-side operations. Not reachable from the web routes.
pub struct EditorService {
    author_repo: Arc<dyn AuthorRepository + Send + Sync>,
    post_repo: Arc<dyn PostRepository + Send + Sync>,
    comment_repo: Arc<dyn CommentRepository + Send + Sync>,
}

impl EditorService {
    pub fn new(
        author_repo: Arc<dyn AuthorRepository + Send + Sync>,
        post_repo: Arc<dyn PostRepository + Send + Sync>,
        comment_repo: Arc<dyn CommentRepository + Send + Sync>,
    ) -> Self {
        Self {
            author_repo,
            post_repo,
            comment_repo,
        }
    }

    pub async fn register_author(&self, req: NewAuthor) -> Result<Author, DomainError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(DomainError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if username.chars().count() > 150 {
            return Err(DomainError::ValidationError(
                "Username must be at most 150 characters".to_string(),
            ));
        }

        if self.author_repo.find_by_username(username).await.is_ok() {
            tracing::warn!("Author registration failed: '{}' already exists", username);
            return Err(DomainError::AuthorAlreadyExists);
        }

        let author = self
            .author_repo
            .create(NewAuthor {
                username: username.to_string(),
                email: req.email.trim().to_string(),
            })
            .await?;

        tracing::info!("Author created: id={}, username={}", author.id, author.username);

        Ok(author)
    }

    pub async fn find_author(&self, username: &str) -> Result<Author, DomainError> {
        self.author_repo.find_by_username(username).await
    }

    pub async fn create_post(&self, mut req: NewPost) -> Result<Post, DomainError> {
        // Validate input
        if req.title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if req.title.chars().count() > 250 {
            return Err(DomainError::ValidationError(
                "Title must be at most 250 characters".to_string(),
            ));
        }
        if req.subtitle.chars().count() > 260 {
            return Err(DomainError::ValidationError(
                "Subtitle must be at most 260 characters".to_string(),
            ));
        }
        if req.body.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Body cannot be empty".to_string(),
            ));
        }

        let slug = match req.slug.take() {
            Some(slug) => slugify(&slug),
            None => slugify(&req.title),
        };
        if slug.is_empty() {
            return Err(DomainError::ValidationError(
                "Slug cannot be empty".to_string(),
            ));
        }
        if slug.len() > 250 {
            return Err(DomainError::ValidationError(
                "Slug must be at most 250 characters".to_string(),
            ));
        }

        let publish = req.publish.unwrap_or_else(Utc::now);
        let date = publish.date_naive();
        if self.post_repo.slug_taken(&slug, date, None).await? {
            tracing::warn!("Slug '{}' already used on {}", slug, date);
            return Err(DomainError::SlugTaken { slug, date });
        }

        self.author_repo.find_by_id(req.author_id).await?;

        req.slug = Some(slug);
        req.publish = Some(publish);
        let post = self.post_repo.create(req).await?;

        tracing::info!(
            "Post created: id={}, author_id={}, status={}",
            post.id,
            post.author_id,
            post.status
        );

        Ok(post)
    }

    pub async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, DomainError> {
        let post = self.post_repo.set_status(id, status).await?;

        tracing::info!("Post status changed: id={}, status={}", id, status);

        Ok(post)
    }

    /// Removes the post together with all of its comments.
    pub async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        self.post_repo.delete(id).await?;

        tracing::info!("Post deleted: id={}", id);

        Ok(())
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.post_repo.list_all().await
    }

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.post_repo.find_by_id(post_id).await?;
        self.comment_repo.list_for_post(post_id).await
    }

    pub async fn set_comment_active(&self, id: i64, active: bool) -> Result<Comment, DomainError> {
        let comment = self.comment_repo.set_active(id, active).await?;

        tracing::info!("Comment moderated: id={}, active={}", id, active);

        Ok(comment)
    }
}
