//! PostgreSQL implementation of EnrollmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::Enrollment;
use crate::domain::foundation::{
    DomainError, EnrollmentId, ErrorCode, Timestamp, TrackId, UserId,
};
use crate::ports::EnrollmentRepository;

/// PostgreSQL implementation of the EnrollmentRepository port.
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    user_id: Uuid,
    track_id: Uuid,
    end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: EnrollmentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            track_id: TrackId::from_uuid(row.track_id),
            end_date: row.end_date.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

/// Picks the grant that should govern access among a user's rows for one
/// track. An active grant always beats an expired one; among equals the
/// latest (rows arrive ordered newest first) wins. A user re-enrolled with
/// a time-bounded grant must not shadow an older lifetime one.
fn pick_current(rows: Vec<EnrollmentRow>, now: Timestamp) -> Option<Enrollment> {
    let mut enrollments: Vec<Enrollment> = rows.into_iter().map(Enrollment::from).collect();
    match enrollments.iter().position(|e| e.is_active(now)) {
        Some(index) => Some(enrollments.swap_remove(index)),
        None => enrollments.into_iter().next(),
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn find_for_track(
        &self,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<Option<Enrollment>, DomainError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, track_id, end_date, created_at
            FROM enrollments
            WHERE user_id = $1 AND track_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(track_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment: {}", e),
            )
        })?;

        Ok(pick_current(rows, Timestamp::now()))
    }
}
