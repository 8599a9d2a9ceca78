//! PostgreSQL implementation of FlashcardRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, FlashcardId, Timestamp, UserId,
};
use crate::domain::srs::{Flashcard, MasteryLevel, ReviewOutcome};
use crate::ports::FlashcardRepository;

/// PostgreSQL implementation of the FlashcardRepository port.
pub struct PostgresFlashcardRepository {
    pool: PgPool,
}

impl PostgresFlashcardRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FlashcardRow {
    id: Uuid,
    user_id: Uuid,
    front: String,
    back: String,
    level: i16,
    next_review: DateTime<Utc>,
    last_result: Option<String>,
    created_at: DateTime<Utc>,
}

fn parse_level(value: i16) -> Result<MasteryLevel, DomainError> {
    u8::try_from(value)
        .ok()
        .and_then(|v| MasteryLevel::new(v).ok())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid mastery level: {}", value),
            )
        })
}

fn parse_outcome(s: &str) -> Result<ReviewOutcome, DomainError> {
    match s {
        "ok" => Ok(ReviewOutcome::Ok),
        "bad" => Ok(ReviewOutcome::Bad),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid review outcome: {}", other),
        )),
    }
}

fn outcome_to_str(outcome: ReviewOutcome) -> &'static str {
    match outcome {
        ReviewOutcome::Ok => "ok",
        ReviewOutcome::Bad => "bad",
    }
}

impl TryFrom<FlashcardRow> for Flashcard {
    type Error = DomainError;

    fn try_from(row: FlashcardRow) -> Result<Self, Self::Error> {
        Ok(Flashcard {
            id: FlashcardId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            front: row.front,
            back: row.back,
            level: parse_level(row.level)?,
            next_review: Timestamp::from_datetime(row.next_review),
            last_result: row.last_result.as_deref().map(parse_outcome).transpose()?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl FlashcardRepository for PostgresFlashcardRepository {
    async fn save(&self, card: &Flashcard) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO flashcards (id, user_id, front, back, level, next_review, last_result, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(card.id.as_uuid())
        .bind(card.user_id.as_uuid())
        .bind(&card.front)
        .bind(&card.back)
        .bind(card.level.as_u8() as i16)
        .bind(card.next_review.as_datetime())
        .bind(card.last_result.map(outcome_to_str))
        .bind(card.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save flashcard: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, card: &Flashcard) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE flashcards
            SET level = $1, next_review = $2, last_result = $3
            WHERE id = $4 AND user_id = $5
            "#,
        )
        .bind(card.level.as_u8() as i16)
        .bind(card.next_review.as_datetime())
        .bind(card.last_result.map(outcome_to_str))
        .bind(card.id.as_uuid())
        .bind(card.user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update flashcard: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_for_user(
        &self,
        id: &FlashcardId,
        user_id: &UserId,
    ) -> Result<Option<Flashcard>, DomainError> {
        let row: Option<FlashcardRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, front, back, level, next_review, last_result, created_at
            FROM flashcards
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find flashcard: {}", e),
            )
        })?;

        row.map(Flashcard::try_from).transpose()
    }

    async fn list_due(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<Flashcard>, DomainError> {
        let rows: Vec<FlashcardRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, front, back, level, next_review, last_result, created_at
            FROM flashcards
            WHERE user_id = $1 AND next_review <= $2
            ORDER BY next_review ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list due flashcards: {}", e),
            )
        })?;

        rows.into_iter().map(Flashcard::try_from).collect()
    }

    async fn delete_for_user(
        &self,
        id: &FlashcardId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM flashcards
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to delete flashcard: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_valid_range() {
        assert_eq!(parse_level(0).unwrap().as_u8(), 0);
        assert_eq!(parse_level(5).unwrap().as_u8(), 5);
    }

    #[test]
    fn parse_level_rejects_out_of_range() {
        assert!(parse_level(6).is_err());
        assert!(parse_level(-1).is_err());
    }

    #[test]
    fn outcome_round_trips_through_str() {
        assert_eq!(parse_outcome(outcome_to_str(ReviewOutcome::Ok)).unwrap(), ReviewOutcome::Ok);
        assert_eq!(parse_outcome(outcome_to_str(ReviewOutcome::Bad)).unwrap(), ReviewOutcome::Bad);
        assert!(parse_outcome("meh").is_err());
    }
}
