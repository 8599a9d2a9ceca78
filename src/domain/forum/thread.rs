//! Forum thread entity.

use crate::domain::foundation::{ThreadId, Timestamp, TrackId, UserId, ValidationError};

/// A discussion thread, optionally attached to a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    pub id: ThreadId,
    pub track_id: Option<TrackId>,
    pub author_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
}

impl ForumThread {
    /// Creates a new thread with a non-empty title.
    pub fn new(
        author_id: UserId,
        track_id: Option<TrackId>,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        Ok(Self {
            id: ThreadId::new(),
            track_id,
            author_id,
            title,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rejects_empty_title() {
        assert!(ForumThread::new(UserId::new(), None, "   ").is_err());
    }

    #[test]
    fn thread_accepts_valid_title() {
        let thread = ForumThread::new(UserId::new(), None, "Liaison rules in A2?").unwrap();
        assert_eq!(thread.title, "Liaison rules in A2?");
        assert!(thread.track_id.is_none());
    }
}
