//! Use-case handlers for the catalog context.

mod get_lesson;
mod list_lessons;
mod list_tracks;
mod upsert_lesson;
mod upsert_track;

pub use get_lesson::{GetLessonHandler, GetLessonQuery};
pub use list_lessons::{ListLessonsHandler, ListLessonsQuery};
pub use list_tracks::{ListTracksHandler, ListTracksQuery};
pub use upsert_lesson::{UpsertLessonCommand, UpsertLessonHandler};
pub use upsert_track::{UpsertTrackCommand, UpsertTrackHandler};
