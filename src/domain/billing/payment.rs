//! Payment record and gateway status mapping.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentId, PlanId, Timestamp, UserId};

/// Status of a payment as reported by the gateway.
///
/// Gateways report status strings in inconsistent casing; parsing is
/// case-insensitive and unknown values map to `Rejected` rather than failing
/// the whole webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Authorized,
    Rejected,
    Refunded,
}

impl PaymentStatus {
    /// Parses a gateway status string, case-insensitively.
    pub fn from_gateway(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pending" | "in_process" => PaymentStatus::Pending,
            "approved" => PaymentStatus::Approved,
            "authorized" => PaymentStatus::Authorized,
            "refunded" | "charged_back" => PaymentStatus::Refunded,
            _ => PaymentStatus::Rejected,
        }
    }

    /// Whether this status counts as a completed purchase.
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Approved | PaymentStatus::Authorized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// An approved or attempted purchase.
///
/// `plan_id` links the payment to a subscription plan; payments without a
/// plan (one-off track purchases) never grant subscription access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub status: PaymentStatus,
    pub plan_id: Option<PlanId>,
    pub amount_cents: i64,
    pub gateway_reference: String,
    pub created_at: Timestamp,
}

impl Payment {
    /// Whether this payment grants subscription access.
    pub fn grants_subscription(&self) -> bool {
        self.status.is_paid() && self.plan_id.is_some()
    }
}
