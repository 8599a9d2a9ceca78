//! ListDueFlashcardsHandler - Query handler for the review queue.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::srs::{Flashcard, SrsError};
use crate::ports::FlashcardRepository;

/// Query for the user's cards due for review.
#[derive(Debug, Clone)]
pub struct ListDueFlashcardsQuery {
    pub user_id: UserId,
}

/// The due review queue, oldest card first.
#[derive(Debug, Clone)]
pub struct ListDueFlashcardsResult {
    pub cards: Vec<Flashcard>,
}

pub struct ListDueFlashcardsHandler {
    repository: Arc<dyn FlashcardRepository>,
}

impl ListDueFlashcardsHandler {
    pub fn new(repository: Arc<dyn FlashcardRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListDueFlashcardsQuery,
    ) -> Result<ListDueFlashcardsResult, SrsError> {
        let cards = self
            .repository
            .list_due(&query.user_id, Timestamp::now())
            .await
            .map_err(|e| SrsError::infrastructure(e.to_string()))?;

        Ok(ListDueFlashcardsResult { cards })
    }
}
