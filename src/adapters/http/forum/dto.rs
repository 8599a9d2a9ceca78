//! HTTP DTOs for forum endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::forum::{ForumPost, ForumThread};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a new thread.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
    /// Optional track the thread discusses.
    #[serde(default)]
    pub track_id: Option<String>,
}

/// Request to reply to a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}

/// Query string for the thread index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadsQuery {
    /// Restrict the listing to one track.
    #[serde(default)]
    pub track_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A discussion thread.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadResponse {
    pub id: String,
    pub track_id: Option<String>,
    pub author_id: String,
    pub title: String,
    pub created_at: String,
}

impl From<ForumThread> for ThreadResponse {
    fn from(thread: ForumThread) -> Self {
        Self {
            id: thread.id.to_string(),
            track_id: thread.track_id.map(|id| id.to_string()),
            author_id: thread.author_id.to_string(),
            title: thread.title,
            created_at: thread.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// The thread index, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadsResponse {
    pub threads: Vec<ThreadResponse>,
}

/// A reply in a thread.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: String,
}

impl From<ForumPost> for PostResponse {
    fn from(post: ForumPost) -> Self {
        Self {
            id: post.id.to_string(),
            thread_id: post.thread_id.to_string(),
            author_id: post.author_id.to_string(),
            body: post.body,
            created_at: post.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A thread's replies, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn thread_response_omits_missing_track() {
        let thread = ForumThread::new(UserId::new(), None, "Pronunciation tips?").unwrap();
        let response = ThreadResponse::from(thread);
        assert!(response.track_id.is_none());
    }

    #[test]
    fn threads_query_parses_empty() {
        let query: ThreadsQuery = serde_json::from_str("{}").unwrap();
        assert!(query.track_id.is_none());
    }
}
