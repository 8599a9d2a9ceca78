//! PostgreSQL implementation of CatalogRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Lesson, Track};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CatalogRepository;

/// PostgreSQL implementation of the CatalogRepository port.
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn upsert_track(&self, track: &Track) -> Result<(), DomainError> {
        // The slug is the stable key; re-running an upsert keeps the
        // original row id so lesson links survive.
        sqlx::query(
            r#"
            INSERT INTO tracks (id, slug, title, description, cefr_level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (slug)
            DO UPDATE SET title = EXCLUDED.title,
                          description = EXCLUDED.description,
                          cefr_level = EXCLUDED.cefr_level
            "#,
        )
        .bind(track.id.as_uuid())
        .bind(&track.slug)
        .bind(&track.title)
        .bind(&track.description)
        .bind(track.cefr_level.as_str())
        .bind(track.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert track: {}", e),
            )
        })?;

        Ok(())
    }

    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, track_id, module_title, title, position, body, video_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (track_id, module_title, position)
            DO UPDATE SET title = EXCLUDED.title,
                          body = EXCLUDED.body,
                          video_url = EXCLUDED.video_url
            "#,
        )
        .bind(lesson.id.as_uuid())
        .bind(lesson.track_id.as_uuid())
        .bind(&lesson.module_title)
        .bind(&lesson.title)
        .bind(lesson.position)
        .bind(&lesson.body)
        .bind(&lesson.video_url)
        .bind(lesson.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert lesson: {}", e),
            )
        })?;

        Ok(())
    }
}
