//! HTTP handlers for forum endpoints.
//!
//! Read endpoints are public; posting requires an authenticated user and
//! sits behind the per-IP rate limit for forum writes.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::forum::{
    CreateThreadCommand, CreateThreadHandler, ListPostsHandler, ListPostsQuery,
    ListThreadsHandler, ListThreadsQuery, ReplyToThreadCommand, ReplyToThreadHandler,
};
use crate::domain::forum::ForumError;
use crate::domain::foundation::{ThreadId, TrackId, ValidationError};
use crate::ports::ForumRepository;

use super::dto::{
    CreatePostRequest, CreateThreadRequest, PostResponse, PostsResponse, ThreadResponse,
    ThreadsQuery, ThreadsResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for forum endpoints.
#[derive(Clone)]
pub struct ForumAppState {
    pub forum: Arc<dyn ForumRepository>,
}

impl ForumAppState {
    pub fn create_thread_handler(&self) -> CreateThreadHandler {
        CreateThreadHandler::new(self.forum.clone())
    }

    pub fn list_threads_handler(&self) -> ListThreadsHandler {
        ListThreadsHandler::new(self.forum.clone())
    }

    pub fn reply_handler(&self) -> ReplyToThreadHandler {
        ReplyToThreadHandler::new(self.forum.clone())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.forum.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/forum/threads - Thread index, optionally filtered by track.
pub async fn list_threads(
    State(state): State<ForumAppState>,
    Query(query): Query<ThreadsQuery>,
) -> Result<impl IntoResponse, ForumApiError> {
    let track_id = parse_optional_track_id(query.track_id)?;

    let threads = state
        .list_threads_handler()
        .handle(ListThreadsQuery { track_id })
        .await?;

    Ok(Json(ThreadsResponse {
        threads: threads.into_iter().map(ThreadResponse::from).collect(),
    }))
}

/// POST /api/forum/threads - Open a new thread.
pub async fn create_thread(
    State(state): State<ForumAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateThreadRequest>,
) -> Result<impl IntoResponse, ForumApiError> {
    let track_id = parse_optional_track_id(request.track_id)?;

    let thread = state
        .create_thread_handler()
        .handle(CreateThreadCommand {
            author_id: user.id,
            track_id,
            title: request.title,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ThreadResponse::from(thread))))
}

/// GET /api/forum/threads/:id/posts - A thread's replies, oldest first.
pub async fn list_posts(
    State(state): State<ForumAppState>,
    Path(thread_id): Path<ThreadId>,
) -> Result<impl IntoResponse, ForumApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery { thread_id })
        .await?;

    Ok(Json(PostsResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// POST /api/forum/threads/:id/posts - Reply to a thread.
pub async fn create_post(
    State(state): State<ForumAppState>,
    RequireAuth(user): RequireAuth,
    Path(thread_id): Path<ThreadId>,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ForumApiError> {
    let post = state
        .reply_handler()
        .handle(ReplyToThreadCommand {
            author_id: user.id,
            thread_id,
            body: request.body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

fn parse_optional_track_id(raw: Option<String>) -> Result<Option<TrackId>, ForumApiError> {
    match raw {
        Some(raw) => raw
            .parse::<TrackId>()
            .map(Some)
            .map_err(|_| {
                ForumError::Validation(ValidationError::invalid_format("track_id", "not a UUID"))
                    .into()
            }),
        None => Ok(None),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts forum errors to HTTP responses.
pub struct ForumApiError(ForumError);

impl From<ForumError> for ForumApiError {
    fn from(err: ForumError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ForumApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            ForumError::ThreadNotFound(_) => (StatusCode::NOT_FOUND, "THREAD_NOT_FOUND"),
            ForumError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            ForumError::Infrastructure(msg) => {
                tracing::error!("Forum endpoint failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
