//! Error type for the spaced-repetition context.

use thiserror::Error;

use crate::domain::foundation::{FlashcardId, ValidationError};

/// Errors raised by flashcard use cases.
#[derive(Debug, Clone, Error)]
pub enum SrsError {
    #[error("Flashcard {0} not found")]
    NotFound(FlashcardId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl SrsError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SrsError::Infrastructure(message.into())
    }
}
