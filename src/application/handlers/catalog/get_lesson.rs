//! GetLessonHandler - Query handler for a gated lesson body.

use std::sync::Arc;

use crate::application::handlers::billing::{CheckTrackAccessHandler, CheckTrackAccessQuery};
use crate::domain::catalog::{CatalogError, Lesson};
use crate::domain::foundation::{LessonId, UserId};
use crate::ports::CatalogReader;

/// Query for one lesson's full content.
#[derive(Debug, Clone)]
pub struct GetLessonQuery {
    pub user_id: UserId,
    pub lesson_id: LessonId,
}

/// Loads a lesson and enforces the entitlement gate for its track.
pub struct GetLessonHandler {
    reader: Arc<dyn CatalogReader>,
    track_access: Arc<CheckTrackAccessHandler>,
}

impl GetLessonHandler {
    pub fn new(reader: Arc<dyn CatalogReader>, track_access: Arc<CheckTrackAccessHandler>) -> Self {
        Self {
            reader,
            track_access,
        }
    }

    pub async fn handle(&self, query: GetLessonQuery) -> Result<Lesson, CatalogError> {
        let lesson = self
            .reader
            .find_lesson(&query.lesson_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?
            .ok_or(CatalogError::LessonNotFound(query.lesson_id))?;

        let access = self
            .track_access
            .handle(CheckTrackAccessQuery {
                user_id: query.user_id,
                track_id: lesson.track_id,
            })
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        if !access.access.is_granted() {
            return Err(CatalogError::AccessDenied);
        }

        Ok(lesson)
    }
}
