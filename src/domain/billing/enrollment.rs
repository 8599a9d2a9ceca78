//! Enrollment - a user's access grant to a single track.

use crate::domain::foundation::{EnrollmentId, Timestamp, TrackId, UserId};

/// Links a user to a track, optionally time-bounded.
///
/// `end_date = None` means lifetime access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub track_id: TrackId,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Enrollment {
    /// Creates a lifetime enrollment.
    pub fn lifetime(user_id: UserId, track_id: TrackId) -> Self {
        Self {
            id: EnrollmentId::new(),
            user_id,
            track_id,
            end_date: None,
            created_at: Timestamp::now(),
        }
    }

    /// Creates an enrollment that expires at `end_date`.
    pub fn until(user_id: UserId, track_id: TrackId, end_date: Timestamp) -> Self {
        Self {
            id: EnrollmentId::new(),
            user_id,
            track_id,
            end_date: Some(end_date),
            created_at: Timestamp::now(),
        }
    }

    /// Whether the enrollment grants access at `now`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        match self.end_date {
            None => true,
            Some(end) => !end.is_before(&now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_enrollment_is_always_active() {
        let enrollment = Enrollment::lifetime(UserId::new(), TrackId::new());
        assert!(enrollment.is_active(Timestamp::now().plus_days(10_000)));
    }

    #[test]
    fn future_end_date_is_active() {
        let enrollment = Enrollment::until(
            UserId::new(),
            TrackId::new(),
            Timestamp::now().plus_days(30),
        );
        assert!(enrollment.is_active(Timestamp::now()));
    }

    #[test]
    fn past_end_date_is_expired() {
        let enrollment = Enrollment::until(
            UserId::new(),
            TrackId::new(),
            Timestamp::now().minus_days(1),
        );
        assert!(!enrollment.is_active(Timestamp::now()));
    }
}
