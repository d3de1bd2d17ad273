//! In-memory repositories sharing one store, for tests of the layers above.

use crate::data::{AuthorRepository, CommentRepository, PostRepository};
use crate::domain::author::NewAuthor;
use crate::domain::comment::NewComment;
use crate::domain::post::{slugify, NewPost};
use crate::domain::{Author, Comment, DomainError, Post, PostStatus};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    authors: Vec<Author>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored comments including hidden ones.
    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }
}

fn sorted_by_publish_desc(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.publish.cmp(&a.publish));
    posts
}

fn sorted_by_created(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    comments
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn create(&self, req: NewAuthor) -> Result<Author, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.authors.iter().any(|a| a.username == req.username) {
            return Err(DomainError::AuthorAlreadyExists);
        }
        let author = Author {
            id: state.next_id(),
            username: req.username,
            email: req.email,
            created_at: Utc::now(),
        };
        state.authors.push(author.clone());
        Ok(author)
    }

    async fn find_by_username(&self, username: &str) -> Result<Author, DomainError> {
        let state = self.state.lock().unwrap();
        state
            .authors
            .iter()
            .find(|a| a.username == username)
            .cloned()
            .ok_or(DomainError::AuthorNotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Author, DomainError> {
        let state = self.state.lock().unwrap();
        state
            .authors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(DomainError::AuthorNotFound)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, req: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.lock().unwrap();
        let author = state
            .authors
            .iter()
            .find(|a| a.id == req.author_id)
            .map(|a| a.username.clone())
            .ok_or(DomainError::AuthorNotFound)?;

        let slug = req.slug.unwrap_or_else(|| slugify(&req.title));
        let now = Utc::now();
        let publish = req.publish.unwrap_or(now);
        if state
            .posts
            .iter()
            .any(|p| p.slug == slug && p.publish_date() == publish.date_naive())
        {
            return Err(DomainError::SlugTaken {
                slug,
                date: publish.date_naive(),
            });
        }

        let post = Post {
            id: state.next_id(),
            title: req.title,
            subtitle: req.subtitle,
            slug,
            author_id: req.author_id,
            author,
            image: req.image,
            body: req.body,
            publish,
            created_at: now,
            updated_at: now,
            status: req.status,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, DomainError> {
        let state = self.state.lock().unwrap();
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(DomainError::PostNotFound)
    }

    async fn find_published(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DomainError::PostNotFound)?;
        let state = self.state.lock().unwrap();
        let matches: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| p.is_published() && p.slug == slug && p.publish_date() == date)
            .collect();
        match matches.as_slice() {
            [post] => Ok((*post).clone()),
            _ => Err(DomainError::PostNotFound),
        }
    }

    async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().unwrap();
        let posts = state.posts.iter().filter(|p| p.is_published()).cloned().collect();
        Ok(sorted_by_publish_desc(posts))
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(sorted_by_publish_desc(state.posts.clone()))
    }

    async fn slug_taken(
        &self,
        slug: &str,
        date: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().any(|p| {
            p.slug == slug && p.publish_date() == date && Some(p.id) != exclude_id
        }))
    }

    async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, DomainError> {
        let mut state = self.state.lock().unwrap();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::PostNotFound)?;
        post.status = status;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(DomainError::PostNotFound);
        }
        state.comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, req: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.state.lock().unwrap();
        if !state.posts.iter().any(|p| p.id == req.post_id) {
            return Err(DomainError::PostNotFound);
        }
        let now = Utc::now();
        let comment = Comment {
            id: state.next_id(),
            post_id: req.post_id,
            name: req.name,
            email: req.email,
            body: req.body,
            created_at: now,
            updated_at: now,
            active: true,
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.state.lock().unwrap();
        let comments = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();
        Ok(sorted_by_created(comments))
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.state.lock().unwrap();
        let comments = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        Ok(sorted_by_created(comments))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Comment, DomainError> {
        let mut state = self.state.lock().unwrap();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CommentNotFound)?;
        comment.active = active;
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }
}
