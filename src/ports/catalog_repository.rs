//! Write-side port for the content catalog (admin back-office).

use async_trait::async_trait;

use crate::domain::catalog::{Lesson, Track};
use crate::domain::foundation::DomainError;

/// Persistence for catalog entries.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Inserts or updates a track keyed by slug.
    async fn upsert_track(&self, track: &Track) -> Result<(), DomainError>;

    /// Inserts or updates a lesson keyed by (track, module, position).
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), DomainError>;
}
