//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{CefrLevel, Lesson, Track};
use crate::ports::LessonSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs (admin back-office)
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create or replace a track, keyed by slug.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTrackRequest {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// CEFR proficiency tier ("A1" through "C2").
    pub cefr_level: CefrLevel,
}

/// Request to create or replace a lesson within a track.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertLessonRequest {
    pub track_id: String,
    pub module_title: String,
    pub title: String,
    pub position: i32,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A course track.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cefr_level: CefrLevel,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            id: track.id.to_string(),
            slug: track.slug,
            title: track.title,
            description: track.description,
            cefr_level: track.cefr_level,
        }
    }
}

/// The public track listing.
#[derive(Debug, Clone, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackResponse>,
}

/// Lesson metadata without the gated body.
#[derive(Debug, Clone, Serialize)]
pub struct LessonSummaryResponse {
    pub id: String,
    pub track_id: String,
    pub module_title: String,
    pub title: String,
    pub position: i32,
}

impl From<LessonSummary> for LessonSummaryResponse {
    fn from(summary: LessonSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            track_id: summary.track_id.to_string(),
            module_title: summary.module_title,
            title: summary.title,
            position: summary.position,
        }
    }
}

/// A track's lesson listing.
#[derive(Debug, Clone, Serialize)]
pub struct LessonsResponse {
    pub lessons: Vec<LessonSummaryResponse>,
}

/// A full lesson including its body.
#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub id: String,
    pub track_id: String,
    pub module_title: String,
    pub title: String,
    pub position: i32,
    pub body: String,
    pub video_url: Option<String>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            track_id: lesson.track_id.to_string(),
            module_title: lesson.module_title,
            title: lesson.title,
            position: lesson.position,
            body: lesson.body,
            video_url: lesson.video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cefr_level_deserializes_uppercase() {
        let request: UpsertTrackRequest = serde_json::from_str(
            r#"{"slug": "french-b1", "title": "Intermediate French", "cefr_level": "B1"}"#,
        )
        .unwrap();
        assert_eq!(request.cefr_level, CefrLevel::B1);
        assert!(request.description.is_empty());
    }

    #[test]
    fn track_response_preserves_slug() {
        let track = Track::new("french-a1", "Beginner French", "From zero", CefrLevel::A1)
            .unwrap();
        let response = TrackResponse::from(track);
        assert_eq!(response.slug, "french-a1");
        assert_eq!(response.cefr_level, CefrLevel::A1);
    }
}
