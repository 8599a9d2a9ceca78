//! DeleteFlashcardHandler - Command handler for removing a card.

use std::sync::Arc;

use crate::domain::foundation::{FlashcardId, UserId};
use crate::domain::srs::SrsError;
use crate::ports::FlashcardRepository;

/// Command to delete one of the user's own cards.
#[derive(Debug, Clone)]
pub struct DeleteFlashcardCommand {
    pub user_id: UserId,
    pub flashcard_id: FlashcardId,
}

pub struct DeleteFlashcardHandler {
    repository: Arc<dyn FlashcardRepository>,
}

impl DeleteFlashcardHandler {
    pub fn new(repository: Arc<dyn FlashcardRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteFlashcardCommand) -> Result<(), SrsError> {
        let deleted = self
            .repository
            .delete_for_user(&cmd.flashcard_id, &cmd.user_id)
            .await
            .map_err(|e| SrsError::infrastructure(e.to_string()))?;

        if !deleted {
            return Err(SrsError::NotFound(cmd.flashcard_id));
        }

        Ok(())
    }
}
