//! CheckTrackAccessHandler - Query handler for per-track access.

use std::sync::Arc;

use crate::domain::billing::{track_access, BillingError, SubscriptionAccess, TrackAccess};
use crate::domain::foundation::{Timestamp, TrackId, UserId};
use crate::ports::EnrollmentRepository;

use super::{CheckSubscriptionHandler, CheckSubscriptionQuery};

/// Query for access to one track.
#[derive(Debug, Clone)]
pub struct CheckTrackAccessQuery {
    pub user_id: UserId,
    pub track_id: TrackId,
}

/// Resolved track access and its source.
#[derive(Debug, Clone)]
pub struct CheckTrackAccessResult {
    pub access: TrackAccess,
}

/// Resolves track access: a live enrollment short-circuits; otherwise the
/// subscription resolver decides.
pub struct CheckTrackAccessHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    subscription: CheckSubscriptionHandler,
}

impl CheckTrackAccessHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        subscription: CheckSubscriptionHandler,
    ) -> Self {
        Self {
            enrollments,
            subscription,
        }
    }

    pub async fn handle(
        &self,
        query: CheckTrackAccessQuery,
    ) -> Result<CheckTrackAccessResult, BillingError> {
        let now = Timestamp::now();
        let enrollment = self
            .enrollments
            .find_for_track(&query.user_id, &query.track_id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        // Enrollment wins without touching payment rows.
        if enrollment.as_ref().is_some_and(|e| e.is_active(now)) {
            return Ok(CheckTrackAccessResult {
                access: TrackAccess::Enrolled,
            });
        }

        let subscription = self
            .subscription
            .handle(CheckSubscriptionQuery {
                user_id: query.user_id,
            })
            .await
            .map(|r| r.access)
            // A user row can be missing for freshly provisioned sessions;
            // that is a plain "no subscription", not a 500.
            .or_else(|e| match e {
                BillingError::UserNotFound(_) => Ok(SubscriptionAccess::None),
                other => Err(other),
            })?;

        Ok(CheckTrackAccessResult {
            access: track_access(enrollment.as_ref(), now, subscription),
        })
    }
}
