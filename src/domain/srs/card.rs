//! Flashcard entity and mastery level value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FlashcardId, Timestamp, UserId, ValidationError};

use super::scheduler::{next_state, ReviewOutcome, ReviewSchedule};

/// Mastery level of a flashcard, always in [0, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    /// Lowest level; cards start here and failed cards return here.
    pub const MIN: MasteryLevel = MasteryLevel(0);

    /// Highest level; correct answers cap here.
    pub const MAX: MasteryLevel = MasteryLevel(5);

    /// Creates a level, rejecting values above 5.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX.0 {
            return Err(ValidationError::out_of_range("level", 0, 5, value as i32));
        }
        Ok(Self(value))
    }

    /// Returns the level promoted by one, capped at the maximum.
    pub fn promoted(&self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns the level as an index into the interval table.
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> u8 {
        level.0
    }
}

/// A user's flashcard with its current review state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub user_id: UserId,
    pub front: String,
    pub back: String,
    pub level: MasteryLevel,
    pub next_review: Timestamp,
    pub last_result: Option<ReviewOutcome>,
    pub created_at: Timestamp,
}

impl Flashcard {
    /// Creates a new card at level 0, due immediately.
    pub fn new(
        user_id: UserId,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let front = front.into();
        let back = back.into();
        if front.trim().is_empty() {
            return Err(ValidationError::empty_field("front"));
        }
        if back.trim().is_empty() {
            return Err(ValidationError::empty_field("back"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: FlashcardId::new(),
            user_id,
            front,
            back,
            level: MasteryLevel::MIN,
            next_review: now,
            last_result: None,
            created_at: now,
        })
    }

    /// Whether the card is due for review at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.next_review.is_after(&now)
    }

    /// Applies a review outcome, mutating level and next-review timestamp.
    ///
    /// Returns the schedule so callers can report it without re-reading.
    pub fn review(&mut self, outcome: ReviewOutcome, now: Timestamp) -> ReviewSchedule {
        let schedule = next_state(self.level, outcome, now);
        self.level = schedule.level;
        self.next_review = schedule.next_review;
        self.last_result = Some(outcome);
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> Flashcard {
        Flashcard::new(UserId::new(), "bonjour", "good morning").unwrap()
    }

    #[test]
    fn new_card_starts_at_level_zero_and_is_due() {
        let card = test_card();
        assert_eq!(card.level, MasteryLevel::MIN);
        assert!(card.is_due(Timestamp::now()));
        assert!(card.last_result.is_none());
    }

    #[test]
    fn new_card_rejects_empty_front() {
        let result = Flashcard::new(UserId::new(), "  ", "back");
        assert!(result.is_err());
    }

    #[test]
    fn new_card_rejects_empty_back() {
        let result = Flashcard::new(UserId::new(), "front", "");
        assert!(result.is_err());
    }

    #[test]
    fn review_promotes_and_reschedules() {
        let mut card = test_card();
        let now = Timestamp::now();

        let schedule = card.review(ReviewOutcome::Ok, now);

        assert_eq!(card.level.as_u8(), 1);
        assert_eq!(card.next_review, schedule.next_review);
        assert_eq!(card.last_result, Some(ReviewOutcome::Ok));
        assert!(!card.is_due(now));
    }

    #[test]
    fn failed_review_resets_level() {
        let mut card = test_card();
        let now = Timestamp::now();
        card.review(ReviewOutcome::Ok, now);
        card.review(ReviewOutcome::Ok, now);
        assert_eq!(card.level.as_u8(), 2);

        card.review(ReviewOutcome::Bad, now);
        assert_eq!(card.level, MasteryLevel::MIN);
        assert_eq!(card.last_result, Some(ReviewOutcome::Bad));
    }

    #[test]
    fn mastery_level_rejects_out_of_range() {
        assert!(MasteryLevel::new(6).is_err());
        assert!(MasteryLevel::new(5).is_ok());
    }

    #[test]
    fn mastery_level_deserializes_with_bound_check() {
        let level: MasteryLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level.as_u8(), 3);

        let result: Result<MasteryLevel, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }
}
