//! Forum post entity.

use crate::domain::foundation::{PostId, ThreadId, Timestamp, UserId, ValidationError};

/// A reply in a discussion thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPost {
    pub id: PostId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl ForumPost {
    /// Creates a new post with a non-empty body.
    pub fn new(
        thread_id: ThreadId,
        author_id: UserId,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::empty_field("body"));
        }

        Ok(Self {
            id: PostId::new(),
            thread_id,
            author_id,
            body,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_rejects_empty_body() {
        assert!(ForumPost::new(ThreadId::new(), UserId::new(), "").is_err());
    }

    #[test]
    fn post_accepts_valid_body() {
        let post = ForumPost::new(ThreadId::new(), UserId::new(), "Merci beaucoup!").unwrap();
        assert_eq!(post.body, "Merci beaucoup!");
    }
}
