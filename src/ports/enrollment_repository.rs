//! Read-side port for track enrollments.

use async_trait::async_trait;

use crate::domain::billing::Enrollment;
use crate::domain::foundation::{DomainError, TrackId, UserId};

/// Lookup for track enrollments. Grants are written out of band by the
/// back-office tooling; the API only ever reads them.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Finds the enrollment for a (user, track) pair, expired or not.
    async fn find_for_track(
        &self,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<Option<Enrollment>, DomainError>;
}
