pub mod blog_service;
pub mod editor_service;

pub use blog_service::{BlogService, PostDetail};
pub use editor_service::EditorService;
