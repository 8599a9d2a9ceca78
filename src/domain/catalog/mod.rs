//! Catalog context - tracks, modules and lessons.

mod errors;
mod lesson;
mod track;

pub use errors::CatalogError;
pub use lesson::Lesson;
pub use track::{CefrLevel, Track};
