use crate::data::{CommentRepository, PostRepository};
use crate::domain::comment::{CommentForm, FormErrors};
use crate::domain::{Comment, DomainError, Post};
use std::sync::Arc;

/// Everything the post page shows for one request.
#[derive(Debug)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    /// Set when this request stored a comment.
    pub new_comment: Option<Comment>,
    /// Values to redisplay; empty unless a submission was rejected.
    pub form: CommentForm,
    pub errors: FormErrors,
}

pub struct BlogService {
    post_repo: Arc<dyn PostRepository + Send + Sync>,
    comment_repo: Arc<dyn CommentRepository + Send + Sync>,
}

impl BlogService {
    pub fn new(
        post_repo: Arc<dyn PostRepository + Send + Sync>,
        comment_repo: Arc<dyn CommentRepository + Send + Sync>,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
        }
    }

    pub async fn list_published_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.post_repo.list_published().await
    }

    pub async fn find_post(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError> {
        self.post_repo.find_published(year, month, day, slug).await
    }

    /// Looks up the published post and, when `submission` is present,
    /// validates and stores it before reading the active comments.
    pub async fn post_detail(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
        submission: Option<CommentForm>,
    ) -> Result<PostDetail, DomainError> {
        let post = self.find_post(year, month, day, slug).await?;

        let mut new_comment = None;
        let mut form = CommentForm::default();
        let mut errors = FormErrors::default();

        if let Some(submitted) = submission {
            let submitted = submitted.cleaned();
            match submitted.check() {
                Ok(()) => {
                    let comment = self
                        .comment_repo
                        .create(submitted.into_new_comment(post.id))
                        .await?;
                    tracing::info!("Comment created: id={}, post_id={}", comment.id, post.id);
                    new_comment = Some(comment);
                }
                Err(field_errors) => {
                    tracing::debug!(
                        "Comment rejected for post_id={}: {:?}",
                        post.id,
                        field_errors
                    );
                    form = submitted;
                    errors = field_errors;
                }
            }
        }

        let comments = self.comment_repo.list_active_for_post(post.id).await?;

        Ok(PostDetail {
            post,
            comments,
            new_comment,
            form,
            errors,
        })
    }
}
