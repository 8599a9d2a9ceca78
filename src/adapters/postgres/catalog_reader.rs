//! PostgreSQL implementation of CatalogReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{CefrLevel, Lesson, Track};
use crate::domain::foundation::{DomainError, ErrorCode, LessonId, Timestamp, TrackId};
use crate::ports::{CatalogReader, LessonSummary};

/// PostgreSQL implementation of the CatalogReader port.
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TrackRow {
    id: Uuid,
    slug: String,
    title: String,
    description: String,
    cefr_level: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LessonRow {
    id: Uuid,
    track_id: Uuid,
    module_title: String,
    title: String,
    position: i32,
    body: String,
    video_url: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LessonSummaryRow {
    id: Uuid,
    track_id: Uuid,
    module_title: String,
    title: String,
    position: i32,
}

fn parse_cefr(s: &str) -> Result<CefrLevel, DomainError> {
    CefrLevel::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid CEFR level: {}", s),
        )
    })
}

impl TryFrom<TrackRow> for Track {
    type Error = DomainError;

    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        Ok(Track {
            id: TrackId::from_uuid(row.id),
            slug: row.slug,
            title: row.title,
            description: row.description,
            cefr_level: parse_cefr(&row.cefr_level)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: LessonId::from_uuid(row.id),
            track_id: TrackId::from_uuid(row.track_id),
            module_title: row.module_title,
            title: row.title,
            position: row.position,
            body: row.body,
            video_url: row.video_url,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

impl From<LessonSummaryRow> for LessonSummary {
    fn from(row: LessonSummaryRow) -> Self {
        LessonSummary {
            id: LessonId::from_uuid(row.id),
            track_id: TrackId::from_uuid(row.track_id),
            module_title: row.module_title,
            title: row.title,
            position: row.position,
        }
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn list_tracks(&self) -> Result<Vec<Track>, DomainError> {
        let rows: Vec<TrackRow> = sqlx::query_as(
            r#"
            SELECT id, slug, title, description, cefr_level, created_at
            FROM tracks
            ORDER BY cefr_level ASC, title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list tracks: {}", e),
            )
        })?;

        rows.into_iter().map(Track::try_from).collect()
    }

    async fn find_track(&self, id: &TrackId) -> Result<Option<Track>, DomainError> {
        let row: Option<TrackRow> = sqlx::query_as(
            r#"
            SELECT id, slug, title, description, cefr_level, created_at
            FROM tracks
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find track: {}", e),
            )
        })?;

        row.map(Track::try_from).transpose()
    }

    async fn list_lessons(&self, track_id: &TrackId) -> Result<Vec<LessonSummary>, DomainError> {
        let rows: Vec<LessonSummaryRow> = sqlx::query_as(
            r#"
            SELECT id, track_id, module_title, title, position
            FROM lessons
            WHERE track_id = $1
            ORDER BY module_title ASC, position ASC
            "#,
        )
        .bind(track_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list lessons: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(LessonSummary::from).collect())
    }

    async fn find_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        let row: Option<LessonRow> = sqlx::query_as(
            r#"
            SELECT id, track_id, module_title, title, position, body, video_url, created_at
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find lesson: {}", e),
            )
        })?;

        Ok(row.map(Lesson::from))
    }
}
