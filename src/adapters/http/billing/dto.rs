//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::billing::{SubscriptionAccess, TrackAccess};
use crate::ports::CheckoutSession;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a hosted checkout for a subscription plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Email for the gateway customer.
    pub email: String,
    /// The plan to purchase.
    pub plan_id: String,
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after cancelled checkout.
    pub cancel_url: String,
}

/// Request to cancel the user's gateway subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelSubscriptionRequest {
    /// Gateway's id for the subscription being cancelled.
    pub gateway_subscription_id: String,
    /// Cancel immediately instead of at period end.
    #[serde(default)]
    pub immediate: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// The user's subscription entitlement and its source.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    /// Whether the user currently has subscription access.
    pub active: bool,
    /// Which hop granted it: `direct`, `family` or `none`.
    pub source: SubscriptionAccess,
}

impl From<SubscriptionAccess> for SubscriptionResponse {
    fn from(access: SubscriptionAccess) -> Self {
        Self {
            active: access.is_active(),
            source: access,
        }
    }
}

/// The user's access to one track and its source.
#[derive(Debug, Clone, Serialize)]
pub struct TrackAccessResponse {
    pub granted: bool,
    /// `enrollment`, `subscription`, `family_subscription` or `none`.
    pub source: &'static str,
}

impl From<TrackAccess> for TrackAccessResponse {
    fn from(access: TrackAccess) -> Self {
        let source = match access {
            TrackAccess::Enrolled => "enrollment",
            TrackAccess::Subscription(SubscriptionAccess::Direct) => "subscription",
            TrackAccess::Subscription(SubscriptionAccess::Family) => "family_subscription",
            TrackAccess::Subscription(SubscriptionAccess::None) | TrackAccess::Denied => "none",
        };
        Self {
            granted: access.is_granted(),
            source,
        }
    }
}

/// A created gateway checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub checkout_url: String,
    /// Unix timestamp when the session expires.
    pub expires_at: u64,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            session_id: session.id,
            checkout_url: session.url,
            expires_at: session.expires_at,
        }
    }
}
