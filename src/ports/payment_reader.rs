//! Read-side port for payment and plan data.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::billing::PaymentFacts;
use crate::domain::foundation::{DomainError, UserId};

/// Counts of payments by status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub authorized: u64,
    pub rejected: u64,
    pub refunded: u64,
}

/// Counts of paid subscriptions by plan type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanTypeCounts {
    pub individual: u64,
    pub family: u64,
}

/// Aggregate billing statistics for the admin back-office.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BillingStatistics {
    pub by_status: StatusCounts,
    pub paid_by_plan_type: PlanTypeCounts,
}

/// Read-optimized queries over payment rows.
#[async_trait]
pub trait PaymentReader: Send + Sync {
    /// Returns status/plan facts for every payment the user has that
    /// references a subscription plan. Used by the entitlement resolver.
    async fn subscription_payment_facts(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentFacts>, DomainError>;

    /// Aggregate statistics for the admin dashboard.
    async fn get_statistics(&self) -> Result<BillingStatistics, DomainError>;
}
