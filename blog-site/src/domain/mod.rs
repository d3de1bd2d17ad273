pub mod author;
pub mod comment;
pub mod error;
pub mod post;

pub use author::Author;
pub use comment::Comment;
pub use error::DomainError;
pub use post::{Post, PostStatus};

/// Splits text on blank lines, dropping empty paragraphs.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .flat_map(|chunk| chunk.split("\r\n\r\n"))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
