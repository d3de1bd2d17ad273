//! Server-rendered blog: a list of published posts, a page per post with
//! its active comments, and a comment form.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
