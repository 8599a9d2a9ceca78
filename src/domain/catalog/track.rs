//! Track - a top-level course grouping lessons into modules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, TrackId, ValidationError};

/// Common European Framework language-proficiency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// Parses a CEFR tier, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A top-level course track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cefr_level: CefrLevel,
    pub created_at: Timestamp,
}

impl Track {
    /// Creates a new track with a validated slug and title.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        cefr_level: CefrLevel,
    ) -> Result<Self, ValidationError> {
        let slug = slug.into();
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValidationError::invalid_format(
                "slug",
                "must be non-empty ascii alphanumerics and hyphens",
            ));
        }

        Ok(Self {
            id: TrackId::new(),
            slug,
            title,
            description: description.into(),
            cefr_level,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cefr_level_parses_case_insensitively() {
        assert_eq!(CefrLevel::parse("b1"), Some(CefrLevel::B1));
        assert_eq!(CefrLevel::parse("C2"), Some(CefrLevel::C2));
        assert_eq!(CefrLevel::parse("D1"), None);
    }

    #[test]
    fn cefr_levels_order_by_proficiency() {
        assert!(CefrLevel::A1 < CefrLevel::C2);
        assert!(CefrLevel::B2 > CefrLevel::B1);
    }

    #[test]
    fn track_rejects_bad_slug() {
        let result = Track::new("no spaces!", "Title", "", CefrLevel::A1);
        assert!(result.is_err());
    }

    #[test]
    fn track_rejects_empty_title() {
        let result = Track::new("french-a1", "  ", "", CefrLevel::A1);
        assert!(result.is_err());
    }

    #[test]
    fn track_accepts_valid_input() {
        let track = Track::new("french-a1", "Francês do Zero", "Beginner track", CefrLevel::A1)
            .unwrap();
        assert_eq!(track.slug, "french-a1");
        assert_eq!(track.cefr_level, CefrLevel::A1);
    }
}
