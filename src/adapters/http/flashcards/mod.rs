//! HTTP adapter for flashcard endpoints.
//!
//! Exposes the spaced-repetition context via REST:
//! - `POST /api/flashcards` - Create a card
//! - `GET /api/flashcards/due` - List cards due for review
//! - `POST /api/flashcards/:id/review` - Submit a review answer
//! - `DELETE /api/flashcards/:id` - Delete a card

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FlashcardsAppState;
pub use routes::flashcards_router;
