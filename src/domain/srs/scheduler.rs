//! Spaced-repetition review scheduler.
//!
//! Computes the next mastery level and review timestamp for a flashcard from
//! the outcome of a single review. The schedule is a fixed interval table
//! indexed by the new level; there is no per-card easiness factor.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::MasteryLevel;

/// Review intervals in days, indexed by mastery level.
///
/// Level 0 is "due immediately"; level 5 is the longest interval.
pub const INTERVAL_DAYS: [i64; 6] = [0, 1, 3, 7, 14, 30];

/// Minutes until a failed card comes back up for review.
pub const RETRY_MINUTES: i64 = 10;

/// Outcome of a single review answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Ok,
    Bad,
}

impl ReviewOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, ReviewOutcome::Ok)
    }
}

/// Scheduling result for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSchedule {
    pub level: MasteryLevel,
    pub next_review: Timestamp,
}

/// Computes the next state for a card reviewed at `now`.
///
/// A correct answer promotes the card one level (capped at 5) and schedules
/// it `INTERVAL_DAYS[new_level]` days out. An incorrect answer resets the
/// card to level 0 regardless of its prior level and brings it back after
/// ten minutes.
pub fn next_state(current: MasteryLevel, outcome: ReviewOutcome, now: Timestamp) -> ReviewSchedule {
    match outcome {
        ReviewOutcome::Ok => {
            let level = current.promoted();
            ReviewSchedule {
                level,
                next_review: now.plus_days(INTERVAL_DAYS[level.as_index()]),
            }
        }
        ReviewOutcome::Bad => ReviewSchedule {
            level: MasteryLevel::MIN,
            next_review: now.plus_minutes(RETRY_MINUTES),
        },
    }
}
