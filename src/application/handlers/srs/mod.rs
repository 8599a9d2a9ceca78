//! Use-case handlers for the spaced-repetition context.

mod create_flashcard;
mod delete_flashcard;
mod list_due_flashcards;
mod review_flashcard;

pub use create_flashcard::{CreateFlashcardCommand, CreateFlashcardHandler, CreateFlashcardResult};
pub use delete_flashcard::{DeleteFlashcardCommand, DeleteFlashcardHandler};
pub use list_due_flashcards::{
    ListDueFlashcardsHandler, ListDueFlashcardsQuery, ListDueFlashcardsResult,
};
pub use review_flashcard::{
    ReviewFlashcardCommand, ReviewFlashcardHandler, ReviewFlashcardResult,
};
