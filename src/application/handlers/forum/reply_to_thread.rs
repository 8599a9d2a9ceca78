//! ReplyToThreadHandler - Command handler for posting a reply.

use std::sync::Arc;

use crate::domain::forum::{ForumError, ForumPost};
use crate::domain::foundation::{ThreadId, UserId};
use crate::ports::ForumRepository;

/// Command to reply to an existing thread.
#[derive(Debug, Clone)]
pub struct ReplyToThreadCommand {
    pub author_id: UserId,
    pub thread_id: ThreadId,
    pub body: String,
}

pub struct ReplyToThreadHandler {
    repository: Arc<dyn ForumRepository>,
}

impl ReplyToThreadHandler {
    pub fn new(repository: Arc<dyn ForumRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ReplyToThreadCommand) -> Result<ForumPost, ForumError> {
        let thread = self
            .repository
            .find_thread(&cmd.thread_id)
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))?
            .ok_or(ForumError::ThreadNotFound(cmd.thread_id))?;

        let post = ForumPost::new(thread.id, cmd.author_id, cmd.body)?;

        self.repository
            .save_post(&post)
            .await
            .map_err(|e| ForumError::infrastructure(e.to_string()))?;

        Ok(post)
    }
}
