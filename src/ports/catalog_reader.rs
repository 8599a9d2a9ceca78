//! Read-side port for the content catalog.

use async_trait::async_trait;

use crate::domain::catalog::{Lesson, Track};
use crate::domain::foundation::{DomainError, LessonId, TrackId};

/// Lesson listing entry without the gated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    pub id: LessonId,
    pub track_id: TrackId,
    pub module_title: String,
    pub title: String,
    pub position: i32,
}

/// Read-optimized catalog queries.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Lists all tracks, A1 first.
    async fn list_tracks(&self) -> Result<Vec<Track>, DomainError>;

    /// Finds a track by id.
    async fn find_track(&self, id: &TrackId) -> Result<Option<Track>, DomainError>;

    /// Lists lesson metadata for a track, ordered by module and position.
    async fn list_lessons(&self, track_id: &TrackId) -> Result<Vec<LessonSummary>, DomainError>;

    /// Finds a full lesson including its body.
    async fn find_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError>;
}
