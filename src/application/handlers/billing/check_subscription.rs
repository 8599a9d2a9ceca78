//! CheckSubscriptionHandler - Query handler for subscription entitlement.

use std::sync::Arc;

use crate::domain::billing::{subscription_access, BillingError, SubscriptionAccess};
use crate::domain::foundation::UserId;
use crate::ports::{PaymentReader, UserReader};

/// Query for the user's subscription entitlement.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionQuery {
    pub user_id: UserId,
}

/// Resolved entitlement, including which hop granted it.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionResult {
    pub access: SubscriptionAccess,
}

/// Resolves subscription access with at most two sequential reads: the
/// user's own payments, then the parent's when the user is a dependent and
/// no direct access was found. Exactly one parent hop, by construction.
pub struct CheckSubscriptionHandler {
    user_reader: Arc<dyn UserReader>,
    payment_reader: Arc<dyn PaymentReader>,
}

impl CheckSubscriptionHandler {
    pub fn new(user_reader: Arc<dyn UserReader>, payment_reader: Arc<dyn PaymentReader>) -> Self {
        Self {
            user_reader,
            payment_reader,
        }
    }

    pub async fn handle(
        &self,
        query: CheckSubscriptionQuery,
    ) -> Result<CheckSubscriptionResult, BillingError> {
        let user = self
            .user_reader
            .find_by_id(&query.user_id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?
            .ok_or(BillingError::UserNotFound(query.user_id))?;

        let own = self
            .payment_reader
            .subscription_payment_facts(&user.id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        // Second read only when needed: the user is a dependent and has no
        // direct access of their own.
        let direct = subscription_access(&own, None);
        if direct.is_active() {
            return Ok(CheckSubscriptionResult { access: direct });
        }

        let access = match user.parent_id {
            Some(parent_id) => {
                let parent = self
                    .payment_reader
                    .subscription_payment_facts(&parent_id)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;
                subscription_access(&own, Some(&parent))
            }
            None => SubscriptionAccess::None,
        };

        Ok(CheckSubscriptionResult { access })
    }
}
