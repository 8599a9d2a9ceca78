//! Spaced-repetition flashcard context.

mod card;
mod errors;
mod scheduler;

pub use card::{Flashcard, MasteryLevel};
pub use errors::SrsError;
pub use scheduler::{next_state, ReviewOutcome, ReviewSchedule, INTERVAL_DAYS, RETRY_MINUTES};
