//! Subscription plan catalog types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PlanId;

/// Whether a plan covers a single account or a family group.
///
/// Family plans extend access to dependent accounts one hop down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Individual,
    Family,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Individual => "individual",
            PlanType::Family => "family",
        }
    }

    /// Parses a stored plan type string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "individual" => Some(PlanType::Individual),
            "family" => Some(PlanType::Family),
            _ => None,
        }
    }
}

/// A purchasable subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub plan_type: PlanType,
    pub price_cents: i64,
}
