//! Entitlement resolver - pure access decisions over fetched billing rows.
//!
//! Decides whether a user has paid access, either to the platform as a whole
//! (subscription) or to a single track (enrollment with subscription
//! fallback). The functions here take data already read by the caller; they
//! never touch storage themselves.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{Enrollment, PaymentStatus, PlanType};

/// The billing facts about one payment needed for an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentFacts {
    pub status: PaymentStatus,
    pub plan_type: Option<PlanType>,
}

impl PaymentFacts {
    /// A paid payment referencing any subscription plan.
    fn is_paid_subscription(&self) -> bool {
        self.status.is_paid() && self.plan_type.is_some()
    }

    /// A paid payment referencing a family plan specifically.
    fn is_paid_family_subscription(&self) -> bool {
        self.status.is_paid() && self.plan_type == Some(PlanType::Family)
    }
}

/// How a subscription entitlement was (or was not) established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionAccess {
    /// The user paid for a plan themselves.
    Direct,
    /// Inherited from the parent account's family plan.
    Family,
    /// No active subscription.
    None,
}

impl SubscriptionAccess {
    pub fn is_active(&self) -> bool {
        !matches!(self, SubscriptionAccess::None)
    }
}

/// Resolves subscription access from the user's own payments and, when the
/// user is a dependent, the parent's payments.
///
/// Access inherits exactly one hop: a dependent checks its parent's family
/// plan, never a grandparent's. Callers pass `parent_payments = None` for
/// users without a parent, which makes deeper chains unrepresentable here.
pub fn subscription_access(
    own_payments: &[PaymentFacts],
    parent_payments: Option<&[PaymentFacts]>,
) -> SubscriptionAccess {
    if own_payments.iter().any(PaymentFacts::is_paid_subscription) {
        return SubscriptionAccess::Direct;
    }

    if let Some(parent) = parent_payments {
        if parent.iter().any(PaymentFacts::is_paid_family_subscription) {
            return SubscriptionAccess::Family;
        }
    }

    SubscriptionAccess::None
}

/// How track access was (or was not) established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackAccess {
    /// An active enrollment for the track.
    Enrolled,
    /// Fell back to an active subscription.
    Subscription(SubscriptionAccess),
    /// Neither enrollment nor subscription.
    Denied,
}

impl TrackAccess {
    pub fn is_granted(&self) -> bool {
        !matches!(self, TrackAccess::Denied)
    }
}

/// Resolves track access: a live enrollment wins; otherwise subscription
/// access decides. An expired enrollment grants nothing by itself but does
/// not block the subscription fallback.
pub fn track_access(
    enrollment: Option<&Enrollment>,
    now: Timestamp,
    subscription: SubscriptionAccess,
) -> TrackAccess {
    if let Some(enrollment) = enrollment {
        if enrollment.is_active(now) {
            return TrackAccess::Enrolled;
        }
    }

    if subscription.is_active() {
        return TrackAccess::Subscription(subscription);
    }

    TrackAccess::Denied
}
