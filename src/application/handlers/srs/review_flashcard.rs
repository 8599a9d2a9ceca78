//! ReviewFlashcardHandler - Command handler for submitting a review answer.

use std::sync::Arc;

use crate::domain::foundation::{FlashcardId, Timestamp, UserId};
use crate::domain::srs::{Flashcard, ReviewOutcome, SrsError};
use crate::ports::FlashcardRepository;

/// Command to record the outcome of reviewing one card.
#[derive(Debug, Clone)]
pub struct ReviewFlashcardCommand {
    pub user_id: UserId,
    pub flashcard_id: FlashcardId,
    pub outcome: ReviewOutcome,
}

/// Result of a recorded review.
#[derive(Debug, Clone)]
pub struct ReviewFlashcardResult {
    pub card: Flashcard,
}

/// Handler that applies the review scheduler to a card and persists it.
pub struct ReviewFlashcardHandler {
    repository: Arc<dyn FlashcardRepository>,
}

impl ReviewFlashcardHandler {
    pub fn new(repository: Arc<dyn FlashcardRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ReviewFlashcardCommand,
    ) -> Result<ReviewFlashcardResult, SrsError> {
        let mut card = self
            .repository
            .find_for_user(&cmd.flashcard_id, &cmd.user_id)
            .await
            .map_err(|e| SrsError::infrastructure(e.to_string()))?
            .ok_or(SrsError::NotFound(cmd.flashcard_id))?;

        card.review(cmd.outcome, Timestamp::now());

        self.repository
            .update(&card)
            .await
            .map_err(|e| SrsError::infrastructure(e.to_string()))?;

        Ok(ReviewFlashcardResult { card })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockFlashcardRepository {
        cards: Mutex<Vec<Flashcard>>,
        fail_update: bool,
    }

    impl MockFlashcardRepository {
        fn with_card(card: Flashcard) -> Self {
            Self {
                cards: Mutex::new(vec![card]),
                fail_update: false,
            }
        }

        fn empty() -> Self {
            Self {
                cards: Mutex::new(Vec::new()),
                fail_update: false,
            }
        }

        fn failing_update(card: Flashcard) -> Self {
            Self {
                cards: Mutex::new(vec![card]),
                fail_update: true,
            }
        }
    }

    #[async_trait]
    impl FlashcardRepository for MockFlashcardRepository {
        async fn save(&self, card: &Flashcard) -> Result<(), DomainError> {
            self.cards.lock().unwrap().push(card.clone());
            Ok(())
        }

        async fn update(&self, card: &Flashcard) -> Result<(), DomainError> {
            if self.fail_update {
                return Err(DomainError::database("Simulated write failure"));
            }
            let mut cards = self.cards.lock().unwrap();
            if let Some(existing) = cards.iter_mut().find(|c| c.id == card.id) {
                *existing = card.clone();
            }
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
            user_id: &UserId,
            now: Timestamp,
        ) -> Result<Vec<Flashcard>, DomainError> {
            Ok(self
                .cards
                .lock()
                .unwrap()
                .iter()
                .filter(|c| &c.user_id == user_id && c.is_due(now))
                .cloned()
                .collect())
        }

        async fn delete_for_user(
            &self,
            id: &FlashcardId,
            user_id: &UserId,
        ) -> Result<bool, DomainError> {
            let mut cards = self.cards.lock().unwrap();
            let before = cards.len();
            cards.retain(|c| !(&c.id == id && &c.user_id == user_id));
            Ok(cards.len() < before)
        }
    }

    fn test_card(user_id: UserId) -> Flashcard {
        Flashcard::new(user_id, "chien", "dog").unwrap()
    }

    #[tokio::test]
    async fn correct_answer_promotes_and_persists() {
        let user_id = UserId::new();
        let card = test_card(user_id);
        let card_id = card.id;
        let repo = Arc::new(MockFlashcardRepository::with_card(card));

        let handler = ReviewFlashcardHandler::new(repo.clone());
        let result = handler
            .handle(ReviewFlashcardCommand {
                user_id,
                flashcard_id: card_id,
                outcome: ReviewOutcome::Ok,
            })
            .await
            .unwrap();

        assert_eq!(result.card.level.as_u8(), 1);

        let stored = repo.find_for_user(&card_id, &user_id).await.unwrap().unwrap();
        assert_eq!(stored.level.as_u8(), 1);
        assert_eq!(stored.last_result, Some(ReviewOutcome::Ok));
    }

    #[tokio::test]
    async fn incorrect_answer_resets_level() {
        let user_id = UserId::new();
        let mut card = test_card(user_id);
        card.review(ReviewOutcome::Ok, Timestamp::now());
        card.review(ReviewOutcome::Ok, Timestamp::now());
        let card_id = card.id;
        let repo = Arc::new(MockFlashcardRepository::with_card(card));

        let handler = ReviewFlashcardHandler::new(repo);
        let result = handler
            .handle(ReviewFlashcardCommand {
                user_id,
                flashcard_id: card_id,
                outcome: ReviewOutcome::Bad,
            })
            .await
            .unwrap();

        assert_eq!(result.card.level.as_u8(), 0);
    }

    #[tokio::test]
    async fn missing_card_is_not_found() {
        let repo = Arc::new(MockFlashcardRepository::empty());
        let handler = ReviewFlashcardHandler::new(repo);

        let result = handler
            .handle(ReviewFlashcardCommand {
                user_id: UserId::new(),
                flashcard_id: FlashcardId::new(),
                outcome: ReviewOutcome::Ok,
            })
            .await;

        assert!(matches!(result, Err(SrsError::NotFound(_))));
    }

    #[tokio::test]
    async fn another_users_card_is_not_found() {
        let owner = UserId::new();
        let card = test_card(owner);
        let card_id = card.id;
        let repo = Arc::new(MockFlashcardRepository::with_card(card));

        let handler = ReviewFlashcardHandler::new(repo);
        let result = handler
            .handle(ReviewFlashcardCommand {
                user_id: UserId::new(),
                flashcard_id: card_id,
                outcome: ReviewOutcome::Ok,
            })
            .await;

        assert!(matches!(result, Err(SrsError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_failure_surfaces_as_infrastructure_error() {
        let user_id = UserId::new();
        let card = test_card(user_id);
        let card_id = card.id;
        let repo = Arc::new(MockFlashcardRepository::failing_update(card));

        let handler = ReviewFlashcardHandler::new(repo);
        let result = handler
            .handle(ReviewFlashcardCommand {
                user_id,
                flashcard_id: card_id,
                outcome: ReviewOutcome::Ok,
            })
            .await;

        assert!(matches!(result, Err(SrsError::Infrastructure(_))));
    }
}
