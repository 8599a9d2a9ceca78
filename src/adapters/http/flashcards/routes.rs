//! Axum router configuration for flashcard endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_flashcard, delete_flashcard, list_due_flashcards, review_flashcard, FlashcardsAppState,
};

/// Create the flashcards API router.
///
/// # Routes
/// - `POST /` - Create a card
/// - `GET /due` - List cards due for review
/// - `POST /:id/review` - Submit a review answer
/// - `DELETE /:id` - Delete a card
///
/// Suitable for mounting at `/api/flashcards`.
pub fn flashcards_router() -> Router<FlashcardsAppState> {
    Router::new()
        .route("/", post(create_flashcard))
        .route("/due", get(list_due_flashcards))
        .route("/:id/review", post(review_flashcard))
        .route("/:id", axum::routing::delete(delete_flashcard))
}
