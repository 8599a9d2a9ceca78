//! HTTP handlers for catalog endpoints.
//!
//! Track and lesson listings are public; the lesson body is gated on the
//! entitlement resolver, and the upsert endpoints require the admin role.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::billing::{CheckSubscriptionHandler, CheckTrackAccessHandler};
use crate::application::handlers::catalog::{
    GetLessonHandler, GetLessonQuery, ListLessonsHandler, ListLessonsQuery, ListTracksHandler,
    ListTracksQuery, UpsertLessonCommand, UpsertLessonHandler, UpsertTrackCommand,
    UpsertTrackHandler,
};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{LessonId, TrackId, ValidationError};
use crate::ports::{
    CatalogReader, CatalogRepository, EnrollmentRepository, PaymentReader, UserReader,
};

use super::dto::{
    LessonResponse, LessonSummaryResponse, LessonsResponse, TrackResponse, TracksResponse,
    UpsertLessonRequest, UpsertTrackRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for catalog endpoints.
///
/// Carries the billing read ports too: the lesson body gate runs the track
/// access resolver.
#[derive(Clone)]
pub struct CatalogAppState {
    pub reader: Arc<dyn CatalogReader>,
    pub repository: Arc<dyn CatalogRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub users: Arc<dyn UserReader>,
    pub payments: Arc<dyn PaymentReader>,
}

impl CatalogAppState {
    pub fn list_tracks_handler(&self) -> ListTracksHandler {
        ListTracksHandler::new(self.reader.clone())
    }

    pub fn list_lessons_handler(&self) -> ListLessonsHandler {
        ListLessonsHandler::new(self.reader.clone())
    }

    pub fn get_lesson_handler(&self) -> GetLessonHandler {
        let subscription =
            CheckSubscriptionHandler::new(self.users.clone(), self.payments.clone());
        let track_access =
            CheckTrackAccessHandler::new(self.enrollments.clone(), subscription);
        GetLessonHandler::new(self.reader.clone(), Arc::new(track_access))
    }

    pub fn upsert_track_handler(&self) -> UpsertTrackHandler {
        UpsertTrackHandler::new(self.repository.clone())
    }

    pub fn upsert_lesson_handler(&self) -> UpsertLessonHandler {
        UpsertLessonHandler::new(self.reader.clone(), self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Public Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/tracks - Public track listing, A1 first.
pub async fn list_tracks(
    State(state): State<CatalogAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let result = state.list_tracks_handler().handle(ListTracksQuery {}).await?;

    Ok(Json(TracksResponse {
        tracks: result.into_iter().map(TrackResponse::from).collect(),
    }))
}

/// GET /api/tracks/:id/lessons - Public lesson metadata for a track.
pub async fn list_lessons(
    State(state): State<CatalogAppState>,
    Path(track_id): Path<TrackId>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let result = state
        .list_lessons_handler()
        .handle(ListLessonsQuery { track_id })
        .await?;

    Ok(Json(LessonsResponse {
        lessons: result.into_iter().map(LessonSummaryResponse::from).collect(),
    }))
}

/// GET /api/lessons/:id - Full lesson body, 403 without track access.
pub async fn get_lesson(
    State(state): State<CatalogAppState>,
    RequireAuth(user): RequireAuth,
    Path(lesson_id): Path<LessonId>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let lesson = state
        .get_lesson_handler()
        .handle(GetLessonQuery {
            user_id: user.id,
            lesson_id,
        })
        .await?;

    Ok(Json(LessonResponse::from(lesson)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/tracks - Create or replace a track (admin).
pub async fn upsert_track(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<UpsertTrackRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let track = state
        .upsert_track_handler()
        .handle(UpsertTrackCommand {
            slug: request.slug,
            title: request.title,
            description: request.description,
            cefr_level: request.cefr_level,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TrackResponse::from(track))))
}

/// POST /api/admin/lessons - Create or replace a lesson (admin).
pub async fn upsert_lesson(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<UpsertLessonRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let track_id: TrackId = request.track_id.parse().map_err(|_| {
        CatalogError::Validation(ValidationError::invalid_format("track_id", "not a UUID"))
    })?;

    let lesson = state
        .upsert_lesson_handler()
        .handle(UpsertLessonCommand {
            track_id,
            module_title: request.module_title,
            title: request.title,
            position: request.position,
            body: request.body,
            video_url: request.video_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LessonResponse::from(lesson))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts catalog errors to HTTP responses.
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            CatalogError::TrackNotFound(_) => (StatusCode::NOT_FOUND, "TRACK_NOT_FOUND"),
            CatalogError::LessonNotFound(_) => (StatusCode::NOT_FOUND, "LESSON_NOT_FOUND"),
            CatalogError::AccessDenied => (StatusCode::FORBIDDEN, "TRACK_ACCESS_REQUIRED"),
            CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            CatalogError::Infrastructure(msg) => {
                tracing::error!("Catalog endpoint failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
