//! Lesson - a single unit of content within a track module.

use crate::domain::foundation::{LessonId, Timestamp, TrackId, ValidationError};

/// A lesson inside a track, grouped by module title and ordered by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: LessonId,
    pub track_id: TrackId,
    pub module_title: String,
    pub title: String,
    pub position: i32,
    pub body: String,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
}

impl Lesson {
    /// Creates a new lesson.
    pub fn new(
        track_id: TrackId,
        module_title: impl Into<String>,
        title: impl Into<String>,
        position: i32,
        body: impl Into<String>,
        video_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if position < 0 {
            return Err(ValidationError::out_of_range("position", 0, i32::MAX, position));
        }

        Ok(Self {
            id: LessonId::new(),
            track_id,
            module_title: module_title.into(),
            title,
            position,
            body: body.into(),
            video_url,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_rejects_negative_position() {
        let result = Lesson::new(TrackId::new(), "Module 1", "Greetings", -1, "", None);
        assert!(result.is_err());
    }

    #[test]
    fn lesson_rejects_empty_title() {
        let result = Lesson::new(TrackId::new(), "Module 1", "", 0, "", None);
        assert!(result.is_err());
    }

    #[test]
    fn lesson_accepts_valid_input() {
        let lesson = Lesson::new(
            TrackId::new(),
            "Module 1 - Basics",
            "Greetings",
            0,
            "Bonjour, salut...",
            Some("https://videos.example.com/1".to_string()),
        )
        .unwrap();
        assert_eq!(lesson.position, 0);
        assert!(lesson.video_url.is_some());
    }
}
