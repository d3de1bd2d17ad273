use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Author not found")]
    AuthorNotFound,

    #[error("Author already exists")]
    AuthorAlreadyExists,

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Slug '{slug}' is already used by a post published on {date}")]
    SlugTaken { slug: String, date: chrono::NaiveDate },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::AuthorNotFound | Self::PostNotFound | Self::CommentNotFound => 404,
            Self::AuthorAlreadyExists | Self::SlugTaken { .. } => 409,
            Self::ValidationError(_) => 400,
            Self::DatabaseError(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.to_status_code() == 404
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
