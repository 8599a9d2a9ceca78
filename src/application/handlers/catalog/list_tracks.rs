//! ListTracksHandler - Query handler for the public track listing.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Track};
use crate::ports::CatalogReader;

/// Query for the full track catalog.
#[derive(Debug, Clone)]
pub struct ListTracksQuery {}

pub struct ListTracksHandler {
    reader: Arc<dyn CatalogReader>,
}

impl ListTracksHandler {
    pub fn new(reader: Arc<dyn CatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: ListTracksQuery) -> Result<Vec<Track>, CatalogError> {
        self.reader
            .list_tracks()
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))
    }
}
