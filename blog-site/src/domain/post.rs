use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(DomainError::ValidationError(format!(
                "Unknown post status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub author_id: i64,
    /// Username of the author, joined in by the repository.
    pub author: String,
    pub image: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: PostStatus,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar date (UTC) the slug is unique within.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// `/{year}/{month}/{day}/{slug}/`, date components unpadded.
    pub fn absolute_url(&self) -> String {
        format!(
            "/{}/{}/{}/{}/",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }
}

impl Post {
    pub fn paragraphs(&self) -> Vec<&str> {
        super::paragraphs(&self.body)
    }

    /// First `words` words of the body, with an ellipsis when cut.
    pub fn excerpt(&self, words: usize) -> String {
        let mut iter = self.body.split_whitespace();
        let head: Vec<&str> = iter.by_ref().take(words).collect();
        let mut excerpt = head.join(" ");
        if iter.next().is_some() {
            excerpt.push_str(" …");
        }
        excerpt
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    #[serde(default)]
    pub image: String,
    pub body: String,
    /// Defaults to the moment of creation.
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PostStatus,
}

/// Half-open UTC range `[start, end)` covering one calendar day, or `None`
/// when the components do not name a real date.
pub fn publish_day_bounds(
    year: i32,
    month: u32,
    day: u32,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let start = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some((start, start + Duration::days(1)))
}

/// Lowercase, keep `[a-z0-9_-]`, collapse whitespace and hyphen runs into a
/// single `-`, and trim leading/trailing `-` and `_`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_at(publish: DateTime<Utc>) -> Post {
        Post {
            id: 1,
            title: "Hello World".to_string(),
            subtitle: String::new(),
            slug: "hello-world".to_string(),
            author_id: 1,
            author: "admin".to_string(),
            image: String::new(),
            body: "Body".to_string(),
            publish,
            created_at: publish,
            updated_at: publish,
            status: PostStatus::Published,
        }
    }

    #[test]
    fn absolute_url_is_unpadded() {
        let post = post_at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        assert_eq!(post.absolute_url(), "/2024/3/1/hello-world/");
        assert_eq!(post.to_string(), "Hello World");
    }

    #[test]
    fn excerpt_cuts_on_words() {
        let mut post = post_at(Utc::now());
        post.body = "one two  three\nfour".to_string();
        assert_eq!(post.excerpt(2), "one two …");
        assert_eq!(post.excerpt(4), "one two three four");
    }

    #[test]
    fn status_defaults_to_draft_and_parses() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
        assert_eq!("published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn day_bounds_cover_one_day() {
        let (start, end) = publish_day_bounds(2024, 2, 29).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_bounds_reject_impossible_dates() {
        assert!(publish_day_bounds(2024, 13, 1).is_none());
        assert!(publish_day_bounds(2023, 2, 29).is_none());
        assert!(publish_day_bounds(2024, 4, 0).is_none());
    }

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust -- is   fun!  "), "rust-is-fun");
        assert_eq!(slugify("What's new in 2024?"), "whats-new-in-2024");
        assert_eq!(slugify("_private_ note"), "private_-note");
        assert_eq!(slugify("---"), "");
    }
}
