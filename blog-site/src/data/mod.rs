pub mod author_repository;
pub mod comment_repository;
pub mod post_repository;

#[cfg(test)]
pub mod memory;

pub use author_repository::{AuthorRepository, PostgresAuthorRepository};
pub use comment_repository::{CommentRepository, PostgresCommentRepository};
pub use post_repository::{PostRepository, PostgresPostRepository};
