//! PostgreSQL implementation of ForumRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::forum::{ForumPost, ForumThread};
use crate::domain::foundation::{
    DomainError, ErrorCode, PostId, ThreadId, Timestamp, TrackId, UserId,
};
use crate::ports::ForumRepository;

/// PostgreSQL implementation of the ForumRepository port.
pub struct PostgresForumRepository {
    pool: PgPool,
}

impl PostgresForumRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: Uuid,
    track_id: Option<Uuid>,
    author_id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    thread_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<ThreadRow> for ForumThread {
    fn from(row: ThreadRow) -> Self {
        ForumThread {
            id: ThreadId::from_uuid(row.id),
            track_id: row.track_id.map(TrackId::from_uuid),
            author_id: UserId::from_uuid(row.author_id),
            title: row.title,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

impl From<PostRow> for ForumPost {
    fn from(row: PostRow) -> Self {
        ForumPost {
            id: PostId::from_uuid(row.id),
            thread_id: ThreadId::from_uuid(row.thread_id),
            author_id: UserId::from_uuid(row.author_id),
            body: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn save_thread(&self, thread: &ForumThread) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forum_threads (id, track_id, author_id, title, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(thread.id.as_uuid())
        .bind(thread.track_id.as_ref().map(|id| *id.as_uuid()))
        .bind(thread.author_id.as_uuid())
        .bind(&thread.title)
        .bind(thread.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save thread: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, DomainError> {
        let row: Option<ThreadRow> = sqlx::query_as(
            r#"
            SELECT id, track_id, author_id, title, created_at
            FROM forum_threads
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find thread: {}", e),
            )
        })?;

        Ok(row.map(ForumThread::from))
    }

    async fn list_threads(
        &self,
        track_id: Option<&TrackId>,
    ) -> Result<Vec<ForumThread>, DomainError> {
        let rows: Vec<ThreadRow> = match track_id {
            Some(track_id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, track_id, author_id, title, created_at
                    FROM forum_threads
                    WHERE track_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(track_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, track_id, author_id, title, created_at
                    FROM forum_threads
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list threads: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(ForumThread::from).collect())
    }

    async fn save_post(&self, post: &ForumPost) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forum_posts (id, thread_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.thread_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.body)
        .bind(post.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save post: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list_posts(&self, thread_id: &ThreadId) -> Result<Vec<ForumPost>, DomainError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, thread_id, author_id, body, created_at
            FROM forum_posts
            WHERE thread_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(thread_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list posts: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(ForumPost::from).collect())
    }
}
