//! CancelSubscriptionHandler - Command handler for cancelling at the gateway.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::domain::foundation::UserId;
use crate::ports::PaymentProvider;

use super::{CheckSubscriptionHandler, CheckSubscriptionQuery};

/// Command to cancel the user's gateway subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
    /// Gateway's id for the subscription being cancelled.
    pub gateway_subscription_id: String,
    /// Cancel at period end (default) or immediately.
    pub at_period_end: bool,
}

pub struct CancelSubscriptionHandler {
    subscription: CheckSubscriptionHandler,
    provider: Arc<dyn PaymentProvider>,
}

impl CancelSubscriptionHandler {
    pub fn new(subscription: CheckSubscriptionHandler, provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            subscription,
            provider,
        }
    }

    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> Result<(), BillingError> {
        // Only holders of an active subscription can cancel one.
        let entitlement = self
            .subscription
            .handle(CheckSubscriptionQuery {
                user_id: cmd.user_id,
            })
            .await?;

        if !entitlement.access.is_active() {
            return Err(BillingError::NoActiveSubscription(cmd.user_id));
        }

        self.provider
            .cancel_subscription(&cmd.gateway_subscription_id, cmd.at_period_end)
            .await
            .map_err(|e| BillingError::gateway(e.to_string()))?;

        Ok(())
    }
}
