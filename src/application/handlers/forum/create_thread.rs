//! CreateThreadHandler - Command handler for opening a discussion thread.

use std::sync::Arc;

use crate::domain::forum::{ForumError, ForumThread};
use crate::domain::foundation::{TrackId, UserId};
use crate::ports::ForumRepository;

/// Command to open a new thread.
#[derive(Debug, Clone)]
pub struct CreateThreadCommand {
    pub author_id: UserId,
    pub track_id: Option<TrackId>,
    pub title: String,
}

pub struct CreateThreadHandler {
    repository: Arc<dyn ForumRepository>,
}

impl CreateThreadHandler {
    pub fn new(repository: Arc<dyn ForumRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateThreadCommand) -> Result<ForumThread, ForumError> {
        let thread = ForumThread::new(cmd.author_id, cmd.track_id, cmd.title)?;

        self.repository
            .save_thread(&thread)
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))?;

        Ok(thread)
    }
}
