//! ListPostsHandler - Query handler for a thread's replies.

use std::sync::Arc;

use crate::domain::forum::{ForumError, ForumPost};
use crate::domain::foundation::ThreadId;
use crate::ports::ForumRepository;

/// Query for a thread's posts, oldest first.
#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub thread_id: ThreadId,
}

pub struct ListPostsHandler {
    repository: Arc<dyn ForumRepository>,
}

impl ListPostsHandler {
    pub fn new(repository: Arc<dyn ForumRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<ForumPost>, ForumError> {
        let thread = self
            .repository
            .find_thread(&query.thread_id)
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))?;
        if thread.is_none() {
            return Err(ForumError::ThreadNotFound(query.thread_id));
        }

        self.repository
            .list_posts(&query.thread_id)
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))
    }
}
