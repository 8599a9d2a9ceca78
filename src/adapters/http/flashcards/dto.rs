//! HTTP DTOs for flashcard endpoints.
//!
//! The JSON boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::srs::{Flashcard, ReviewOutcome};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a new flashcard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlashcardRequest {
    /// Prompt side of the card (French).
    pub front: String,
    /// Answer side of the card.
    pub back: String,
}

/// Request to record a review answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewFlashcardRequest {
    /// `"ok"` for a correct answer, `"bad"` otherwise.
    pub outcome: ReviewOutcome,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A flashcard with its review state.
#[derive(Debug, Clone, Serialize)]
pub struct FlashcardResponse {
    pub id: String,
    pub front: String,
    pub back: String,
    /// Mastery level, 0 through 5.
    pub level: u8,
    /// When the card is next due (ISO 8601).
    pub next_review: String,
    /// Outcome of the most recent review, if any.
    pub last_result: Option<ReviewOutcome>,
    /// When the card was created (ISO 8601).
    pub created_at: String,
}

impl From<Flashcard> for FlashcardResponse {
    fn from(card: Flashcard) -> Self {
        Self {
            id: card.id.to_string(),
            front: card.front,
            back: card.back,
            level: card.level.as_u8(),
            next_review: card.next_review.as_datetime().to_rfc3339(),
            last_result: card.last_result,
            created_at: card.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// The due review queue.
#[derive(Debug, Clone, Serialize)]
pub struct DueFlashcardsResponse {
    pub count: usize,
    pub cards: Vec<FlashcardResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn flashcard_response_carries_review_state() {
        let mut card = Flashcard::new(UserId::new(), "bonjour", "hello").unwrap();
        card.review(ReviewOutcome::Ok, crate::domain::foundation::Timestamp::now());

        let response = FlashcardResponse::from(card);

        assert_eq!(response.level, 1);
        assert_eq!(response.last_result, Some(ReviewOutcome::Ok));
    }

    #[test]
    fn review_request_parses_lowercase_outcome() {
        let request: ReviewFlashcardRequest =
            serde_json::from_str(r#"{"outcome": "bad"}"#).unwrap();
        assert_eq!(request.outcome, ReviewOutcome::Bad);
    }
}
