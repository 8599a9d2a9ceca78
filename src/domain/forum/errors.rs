//! Error type for the forum context.

use thiserror::Error;

use crate::domain::foundation::{ThreadId, ValidationError};

/// Errors raised by forum use cases.
#[derive(Debug, Clone, Error)]
pub enum ForumError {
    #[error("Thread {0} not found")]
    ThreadNotFound(ThreadId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ForumError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ForumError::Infrastructure(message.into())
    }
}
