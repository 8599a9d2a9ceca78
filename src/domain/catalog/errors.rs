//! Error type for the catalog context.

use thiserror::Error;

use crate::domain::foundation::{LessonId, TrackId, ValidationError};

/// Errors raised by catalog use cases.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Track {0} not found")]
    TrackNotFound(TrackId),

    #[error("Lesson {0} not found")]
    LessonNotFound(LessonId),

    #[error("Access to this lesson requires an enrollment or subscription")]
    AccessDenied,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl CatalogError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }
}
