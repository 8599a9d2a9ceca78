//! Port for forum persistence.

use async_trait::async_trait;

use crate::domain::forum::{ForumPost, ForumThread};
use crate::domain::foundation::{DomainError, ThreadId, TrackId};

/// Persistence and lookup for forum threads and posts.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Persists a new thread.
    async fn save_thread(&self, thread: &ForumThread) -> Result<(), DomainError>;

    /// Finds a thread by id.
    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, DomainError>;

    /// Lists threads, newest first, optionally filtered by track.
    async fn list_threads(
        &self,
        track_id: Option<&TrackId>,
    ) -> Result<Vec<ForumThread>, DomainError>;

    /// Persists a reply.
    async fn save_post(&self, post: &ForumPost) -> Result<(), DomainError>;

    /// Lists posts for a thread, oldest first.
    async fn list_posts(&self, thread_id: &ThreadId) -> Result<Vec<ForumPost>, DomainError>;
}
