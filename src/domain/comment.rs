use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{MurmurError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Input for creating a comment. Comments are never edited or deleted
/// directly; they only go away when their post does.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl NewComment {
    pub fn new(post_id: i64, author_id: i64, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MurmurError::EmptyText);
        }

        Ok(Self {
            post_id,
            author_id,
            text,
            created: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_rejects_empty_text() {
        assert!(matches!(
            NewComment::new(1, 1, "   "),
            Err(MurmurError::EmptyText)
        ));
    }
}
