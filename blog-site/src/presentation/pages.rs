use crate::application::PostDetail;
use crate::domain::comment::{CommentForm, FormErrors};
use crate::domain::{Comment, Post};
use askama::Template;

/// Values every page needs beside its own data.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub media_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            media_url: "/media/".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog/post/list.html")]
pub struct PostListPage {
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "blog/post/detail.html")]
pub struct PostDetailPage {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub new_comment: Option<Comment>,
    pub comment_form: CommentForm,
    pub errors: FormErrors,
    pub media_url: String,
}

impl PostDetailPage {
    pub fn new(detail: PostDetail, settings: &SiteSettings) -> Self {
        Self {
            post: detail.post,
            comments: detail.comments,
            new_comment: detail.new_comment,
            comment_form: detail.form,
            errors: detail.errors,
            media_url: settings.media_url.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub title: &'a str,
    pub message: &'a str,
}
