//! HTTP handlers for flashcard endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers. Every route requires an authenticated user; cards are always
//! scoped to their owner.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::srs::{
    CreateFlashcardCommand, CreateFlashcardHandler, DeleteFlashcardCommand,
    DeleteFlashcardHandler, ListDueFlashcardsHandler, ListDueFlashcardsQuery,
    ReviewFlashcardCommand, ReviewFlashcardHandler,
};
use crate::domain::foundation::FlashcardId;
use crate::domain::srs::SrsError;
use crate::ports::FlashcardRepository;

use super::dto::{
    CreateFlashcardRequest, DueFlashcardsResponse, FlashcardResponse, ReviewFlashcardRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for flashcard endpoints.
#[derive(Clone)]
pub struct FlashcardsAppState {
    pub flashcards: Arc<dyn FlashcardRepository>,
}

impl FlashcardsAppState {
    pub fn create_handler(&self) -> CreateFlashcardHandler {
        CreateFlashcardHandler::new(self.flashcards.clone())
    }

    pub fn review_handler(&self) -> ReviewFlashcardHandler {
        ReviewFlashcardHandler::new(self.flashcards.clone())
    }

    pub fn list_due_handler(&self) -> ListDueFlashcardsHandler {
        ListDueFlashcardsHandler::new(self.flashcards.clone())
    }

    pub fn delete_handler(&self) -> DeleteFlashcardHandler {
        DeleteFlashcardHandler::new(self.flashcards.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/flashcards - Create a card for the authenticated user.
pub async fn create_flashcard(
    State(state): State<FlashcardsAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateFlashcardRequest>,
) -> Result<impl IntoResponse, SrsApiError> {
    let handler = state.create_handler();
    let result = handler
        .handle(CreateFlashcardCommand {
            user_id: user.id,
            front: request.front,
            back: request.back,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(FlashcardResponse::from(result.card))))
}

/// GET /api/flashcards/due - The authenticated user's review queue.
pub async fn list_due_flashcards(
    State(state): State<FlashcardsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, SrsApiError> {
    let handler = state.list_due_handler();
    let result = handler
        .handle(ListDueFlashcardsQuery { user_id: user.id })
        .await?;

    let cards: Vec<FlashcardResponse> =
        result.cards.into_iter().map(FlashcardResponse::from).collect();

    Ok(Json(DueFlashcardsResponse {
        count: cards.len(),
        cards,
    }))
}

/// POST /api/flashcards/:id/review - Submit an answer for one card.
///
/// Returns the card's new level and next-review timestamp. Another user's
/// card is indistinguishable from a missing one: both are 404.
pub async fn review_flashcard(
    State(state): State<FlashcardsAppState>,
    RequireAuth(user): RequireAuth,
    Path(flashcard_id): Path<FlashcardId>,
    Json(request): Json<ReviewFlashcardRequest>,
) -> Result<impl IntoResponse, SrsApiError> {
    let handler = state.review_handler();
    let result = handler
        .handle(ReviewFlashcardCommand {
            user_id: user.id,
            flashcard_id,
            outcome: request.outcome,
        })
        .await?;

    Ok(Json(FlashcardResponse::from(result.card)))
}

/// DELETE /api/flashcards/:id - Delete one of the user's own cards.
pub async fn delete_flashcard(
    State(state): State<FlashcardsAppState>,
    RequireAuth(user): RequireAuth,
    Path(flashcard_id): Path<FlashcardId>,
) -> Result<impl IntoResponse, SrsApiError> {
    let handler = state.delete_handler();
    handler
        .handle(DeleteFlashcardCommand {
            user_id: user.id,
            flashcard_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts flashcard errors to HTTP responses.
pub struct SrsApiError(SrsError);

impl From<SrsError> for SrsApiError {
    fn from(err: SrsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for SrsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            SrsError::NotFound(_) => (StatusCode::NOT_FOUND, "FLASHCARD_NOT_FOUND"),
            SrsError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            SrsError::Infrastructure(msg) => {
                tracing::error!("Flashcard endpoint failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
