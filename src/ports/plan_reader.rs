//! Read-side port for subscription plans.

use async_trait::async_trait;

use crate::domain::billing::SubscriptionPlan;
use crate::domain::foundation::{DomainError, PlanId};

/// Read queries over the plan catalog.
#[async_trait]
pub trait PlanReader: Send + Sync {
    /// Finds a plan by id.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<SubscriptionPlan>, DomainError>;
}
