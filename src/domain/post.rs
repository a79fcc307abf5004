use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{MurmurError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

impl Post {
    /// Short display form of the text, used by listings.
    pub fn preview(&self) -> String {
        self.text.chars().take(15).collect()
    }
}

/// Input for creating a post. `pub_date` is assigned at construction and
/// never updated afterwards.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

impl NewPost {
    pub fn new(author_id: i64, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MurmurError::EmptyText);
        }

        Ok(Self {
            text,
            pub_date: Utc::now(),
            author_id,
            group_id: None,
            image: None,
        })
    }
}

/// Partial update for a post's mutable fields. `None` leaves a field
/// untouched; `group_id` and `image` take a nested `Option` so a post can
/// be detached from its group or have its image removed.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub text: Option<String>,
    pub group_id: Option<Option<i64>>,
    pub image: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_assigns_pub_date() {
        let before = Utc::now();
        let post = NewPost::new(1, "hello world").unwrap();
        assert!(post.pub_date >= before);
        assert_eq!(post.author_id, 1);
        assert!(post.group_id.is_none());
    }

    #[test]
    fn test_new_post_rejects_empty_text() {
        assert!(matches!(NewPost::new(1, ""), Err(MurmurError::EmptyText)));
    }

    #[test]
    fn test_new_post_rejects_whitespace_text() {
        assert!(matches!(
            NewPost::new(1, "  \n\t "),
            Err(MurmurError::EmptyText)
        ));
    }
}
