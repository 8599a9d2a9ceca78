//! ListLessonsHandler - Query handler for a track's lesson metadata.

use std::sync::Arc;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::TrackId;
use crate::ports::{CatalogReader, LessonSummary};

/// Query for the lesson listing of one track.
///
/// Lesson metadata is public; only the lesson body is gated.
#[derive(Debug, Clone)]
pub struct ListLessonsQuery {
    pub track_id: TrackId,
}

pub struct ListLessonsHandler {
    reader: Arc<dyn CatalogReader>,
}

impl ListLessonsHandler {
    pub fn new(reader: Arc<dyn CatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListLessonsQuery) -> Result<Vec<LessonSummary>, CatalogError> {
        // 404 for unknown tracks rather than an empty listing.
        let track = self
            .reader
            .find_track(&query.track_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
        if track.is_none() {
            return Err(CatalogError::TrackNotFound(query.track_id));
        }

        self.reader
            .list_lessons(&query.track_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))
    }
}
