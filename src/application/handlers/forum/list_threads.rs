//! ListThreadsHandler - Query handler for the thread index.

use std::sync::Arc;

use crate::domain::forum::{ForumError, ForumThread};
use crate::domain::foundation::TrackId;
use crate::ports::ForumRepository;

/// Query for threads, optionally scoped to a track.
#[derive(Debug, Clone)]
pub struct ListThreadsQuery {
    pub track_id: Option<TrackId>,
}

pub struct ListThreadsHandler {
    repository: Arc<dyn ForumRepository>,
}

impl ListThreadsHandler {
    pub fn new(repository: Arc<dyn ForumRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListThreadsQuery) -> Result<Vec<ForumThread>, ForumError> {
        self.repository
            .list_threads(query.track_id.as_ref())
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))
    }
}
