//! UpsertLessonHandler - Admin command handler for catalog lessons.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Lesson};
use crate::domain::foundation::TrackId;
use crate::ports::{CatalogReader, CatalogRepository};

/// Command to create or replace a lesson within a track.
#[derive(Debug, Clone)]
pub struct UpsertLessonCommand {
    pub track_id: TrackId,
    pub module_title: String,
    pub title: String,
    pub position: i32,
    pub body: String,
    pub video_url: Option<String>,
}

pub struct UpsertLessonHandler {
    reader: Arc<dyn CatalogReader>,
    repository: Arc<dyn CatalogRepository>,
}

impl UpsertLessonHandler {
    pub fn new(reader: Arc<dyn CatalogReader>, repository: Arc<dyn CatalogRepository>) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(&self, cmd: UpsertLessonCommand) -> Result<Lesson, CatalogError> {
        // Lessons must attach to an existing track.
        let track = self
            .reader
            .find_track(&cmd.track_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
        if track.is_none() {
            return Err(CatalogError::TrackNotFound(cmd.track_id));
        }

        let lesson = Lesson::new(
            cmd.track_id,
            cmd.module_title,
            cmd.title,
            cmd.position,
            cmd.body,
            cmd.video_url,
        )?;

        self.repository
            .upsert_lesson(&lesson)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(lesson)
    }
}
