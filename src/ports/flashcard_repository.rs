//! Port for flashcard persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FlashcardId, Timestamp, UserId};
use crate::domain::srs::Flashcard;

/// Persistence operations for flashcards.
///
/// `find_by_id` is scoped to the owning user so handlers cannot review or
/// delete another user's card.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Persists a new card.
    async fn save(&self, card: &Flashcard) -> Result<(), DomainError>;

    /// Updates an existing card's review state.
    async fn update(&self, card: &Flashcard) -> Result<(), DomainError>;

    /// Finds a card by id, only if it belongs to `user_id`.
    async fn find_for_user(
        &self,
        id: &FlashcardId,
        user_id: &UserId,
    ) -> Result<Option<Flashcard>, DomainError>;

    /// Lists the user's cards due at or before `now`, oldest first.
    async fn list_due(&self, user_id: &UserId, now: Timestamp)
        -> Result<Vec<Flashcard>, DomainError>;

    /// Deletes a card, only if it belongs to `user_id`. Returns whether a
    /// row was removed.
    async fn delete_for_user(
        &self,
        id: &FlashcardId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;
}
