//! CreateCheckoutHandler - Command handler for starting a plan purchase.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::domain::foundation::{PlanId, UserId};
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider, PlanReader};

/// Command to start a hosted checkout for a subscription plan.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub email: String,
    pub plan_id: PlanId,
    pub success_url: String,
    pub cancel_url: String,
}

/// Result carrying the gateway checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub session: CheckoutSession,
}

pub struct CreateCheckoutHandler {
    plans: Arc<dyn PlanReader>,
    provider: Arc<dyn PaymentProvider>,
}

impl CreateCheckoutHandler {
    pub fn new(plans: Arc<dyn PlanReader>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { plans, provider }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, BillingError> {
        // Reject checkouts against unknown plans before calling the gateway.
        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                BillingError::Validation(crate::domain::foundation::ValidationError::invalid_format(
                    "plan_id",
                    "unknown plan",
                ))
            })?;

        let session = self
            .provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.user_id,
                email: cmd.email,
                plan_id: plan.id,
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await
            .map_err(|e| BillingError::gateway(e.to_string()))?;

        Ok(CreateCheckoutResult { session })
    }
}
