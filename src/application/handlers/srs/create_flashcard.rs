//! CreateFlashcardHandler - Command handler for adding a card.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::srs::{Flashcard, SrsError};
use crate::ports::FlashcardRepository;

/// Command to create a new flashcard for the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateFlashcardCommand {
    pub user_id: UserId,
    pub front: String,
    pub back: String,
}

/// Result carrying the freshly created card.
#[derive(Debug, Clone)]
pub struct CreateFlashcardResult {
    pub card: Flashcard,
}

pub struct CreateFlashcardHandler {
    repository: Arc<dyn FlashcardRepository>,
}

impl CreateFlashcardHandler {
    pub fn new(repository: Arc<dyn FlashcardRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateFlashcardCommand,
    ) -> Result<CreateFlashcardResult, SrsError> {
        let card = Flashcard::new(cmd.user_id, cmd.front, cmd.back)?;

        self.repository
            .save(&card)
            .await
            .map_err(|e| SrsError::infrastructure(e.to_string()))?;

        Ok(CreateFlashcardResult { card })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, FlashcardId, Timestamp};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockFlashcardRepository {
        cards: Mutex<Vec<Flashcard>>,
    }

    impl MockFlashcardRepository {
        fn new() -> Self {
            Self {
                cards: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FlashcardRepository for MockFlashcardRepository {
        async fn save(&self, card: &Flashcard) -> Result<(), DomainError> {
            self.cards.lock().unwrap().push(card.clone());
            Ok(())
        }

        async fn update(&self, _card: &Flashcard) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_for_user(
            &self,
            id: &FlashcardId,
            user_id: &UserId,
        ) -> Result<Option<Flashcard>, DomainError> {
            Ok(self
                .cards
                .lock()
                .unwrap()
                .iter()
                .find(|c| &c.id == id && &c.user_id == user_id)
                .cloned())
        }

        async fn list_due(
            &self,
            _user_id: &UserId,
            _now: Timestamp,
        ) -> Result<Vec<Flashcard>, DomainError> {
            Ok(vec![])
        }

        async fn delete_for_user(
            &self,
            _id: &FlashcardId,
            _user_id: &UserId,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn creates_card_at_level_zero() {
        let repo = Arc::new(MockFlashcardRepository::new());
        let handler = CreateFlashcardHandler::new(repo.clone());

        let result = handler
            .handle(CreateFlashcardCommand {
                user_id: UserId::new(),
                front: "fromage".to_string(),
                back: "cheese".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.card.level.as_u8(), 0);
        assert_eq!(repo.cards.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_empty_front() {
        let handler = CreateFlashcardHandler::new(Arc::new(MockFlashcardRepository::new()));

        let result = handler
            .handle(CreateFlashcardCommand {
                user_id: UserId::new(),
                front: " ".to_string(),
                back: "cheese".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SrsError::Validation(_))));
    }
}
