//! Axum router configuration for billing endpoints.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::{rate_limit_middleware, RateLimitState};

use super::handlers::{
    cancel_subscription, create_checkout, get_billing_stats, get_subscription, get_track_access,
    handle_payment_webhook, BillingAppState,
};

/// Create the billing API router.
///
/// # Routes
/// - `GET /subscription` - Current entitlement summary (auth)
/// - `GET /tracks/:id/access` - Track access check (auth)
/// - `POST /checkout` - Start gateway checkout (auth, rate limited)
/// - `POST /cancel` - Cancel subscription (auth, rate limited)
///
/// Suitable for mounting at `/api/billing`.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .route("/subscription", get(get_subscription))
        .route("/tracks/:id/access", get(get_track_access))
        .route("/checkout", post(create_checkout))
        .route("/cancel", post(cancel_subscription))
}

/// Create the billing API router with per-IP limits on the mutating routes.
///
/// Same routes as [`billing_router`], with fixed-window rate limiting
/// applied to `POST /checkout` and `POST /cancel`.
pub fn billing_router_with_limits(
    checkout_limit: RateLimitState,
    cancel_limit: RateLimitState,
) -> Router<BillingAppState> {
    Router::new()
        .route("/subscription", get(get_subscription))
        .route("/tracks/:id/access", get(get_track_access))
        .route(
            "/checkout",
            post(create_checkout)
                .route_layer(from_fn_with_state(checkout_limit, rate_limit_middleware)),
        )
        .route(
            "/cancel",
            post(cancel_subscription)
                .route_layer(from_fn_with_state(cancel_limit, rate_limit_middleware)),
        )
}

/// Create the gateway webhook router.
///
/// Separate from the billing routes because webhooks carry no session auth;
/// they are verified via the HMAC signature header.
///
/// # Routes
/// - `POST /payments` - Handle gateway payment events
pub fn webhook_router() -> Router<BillingAppState> {
    Router::new().route("/payments", post(handle_payment_webhook))
}

/// Create the admin billing router.
///
/// # Routes
/// - `GET /billing/stats` - Payment counts by status and plan type
///
/// Suitable for mounting at `/api/admin`.
pub fn admin_billing_router() -> Router<BillingAppState> {
    Router::new().route("/billing/stats", get(get_billing_stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{Enrollment, Payment, PaymentFacts, SubscriptionPlan};
    use crate::domain::foundation::{DomainError, PlanId, TrackId, UserId};
    use crate::ports::{
        BillingStatistics, CheckoutSession, CreateCheckoutRequest, EnrollmentRepository,
        GatewaySubscription, PaymentError, PaymentProvider, PaymentReader, PaymentRepository,
        PlanReader, UserAccount, UserReader, WebhookEvent,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl UserReader for Noop {
        async fn find_by_id(&self, _id: &UserId) -> Result<Option<UserAccount>, DomainError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl PaymentReader for Noop {
        async fn subscription_payment_facts(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<PaymentFacts>, DomainError> {
            Ok(vec![])
        }

        async fn get_statistics(&self) -> Result<BillingStatistics, DomainError> {
            Ok(BillingStatistics::default())
        }
    }

    #[async_trait]
    impl PaymentRepository for Noop {
        async fn upsert_by_gateway_reference(
            &self,
            _payment: &Payment,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[async_trait]
    impl EnrollmentRepository for Noop {
        async fn find_for_track(
            &self,
            _user_id: &UserId,
            _track_id: &TrackId,
        ) -> Result<Option<Enrollment>, DomainError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl PlanReader for Noop {
        async fn find_by_id(
            &self,
            _id: &PlanId,
        ) -> Result<Option<SubscriptionPlan>, DomainError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl PaymentProvider for Noop {
        async fn create_checkout_session(
            &self,
            _request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Err(PaymentError::invalid_request("noop"))
        }

        async fn cancel_subscription(
            &self,
            _subscription_id: &str,
            _at_period_end: bool,
        ) -> Result<GatewaySubscription, PaymentError> {
            Err(PaymentError::invalid_request("noop"))
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            Err(PaymentError::invalid_webhook("noop"))
        }
    }

    fn test_state() -> BillingAppState {
        BillingAppState {
            users: Arc::new(Noop),
            payment_reader: Arc::new(Noop),
            payment_repository: Arc::new(Noop),
            enrollments: Arc::new(Noop),
            plans: Arc::new(Noop),
            provider: Arc::new(Noop),
        }
    }

    #[test]
    fn billing_router_builds_with_state() {
        let _router: Router<()> = billing_router().with_state(test_state());
    }

    #[test]
    fn webhook_router_builds_with_state() {
        let _router: Router<()> = webhook_router().with_state(test_state());
    }

    #[test]
    fn admin_router_builds_with_state() {
        let _router: Router<()> = admin_billing_router().with_state(test_state());
    }
}
