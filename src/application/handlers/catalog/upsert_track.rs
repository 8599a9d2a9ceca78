//! UpsertTrackHandler - Admin command handler for catalog tracks.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CefrLevel, Track};
use crate::ports::CatalogRepository;

/// Command to create or replace a track, keyed by slug.
#[derive(Debug, Clone)]
pub struct UpsertTrackCommand {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cefr_level: CefrLevel,
}

pub struct UpsertTrackHandler {
    repository: Arc<dyn CatalogRepository>,
}

impl UpsertTrackHandler {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpsertTrackCommand) -> Result<Track, CatalogError> {
        let track = Track::new(cmd.slug, cmd.title, cmd.description, cmd.cefr_level)?;

        self.repository
            .upsert_track(&track)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(track)
    }
}
