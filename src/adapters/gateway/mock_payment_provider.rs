//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports pre-configured responses, error injection,
//! and call tracking.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, GatewaySubscription, PaymentError, PaymentProvider,
    WebhookEvent,
};

/// Mock payment provider for testing.
///
/// Any payload passed to `verify_webhook` yields the configured event,
/// unless the mock was built with `rejecting_webhooks`.
#[derive(Default)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<CheckoutSession>,
    next_subscription: Option<GatewaySubscription>,
    next_webhook_event: Option<WebhookEvent>,
    next_error: Option<PaymentError>,
    reject_webhooks: bool,
    call_log: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    /// Set the checkout session to return.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set the subscription to return from mutation calls.
    pub fn set_subscription(&self, subscription: GatewaySubscription) {
        self.inner.lock().unwrap().next_subscription = Some(subscription);
    }

    /// Set the webhook event to return on verification.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Inject an error for the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Names of methods called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().call_log.clone()
    }

    fn record(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(method.to_string());
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record("create_checkout_session")?;

        let configured = self.inner.lock().unwrap().next_checkout.take();
        Ok(configured.unwrap_or_else(|| CheckoutSession {
            id: "cs_mock".to_string(),
            url: format!("https://checkout.example.com/cs_mock?plan={}", request.plan_id),
            expires_at: chrono::Utc::now().timestamp().max(0) as u64 + 24 * 60 * 60,
        }))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Result<GatewaySubscription, PaymentError> {
        self.record("cancel_subscription")?;

        let configured = self.inner.lock().unwrap().next_subscription.take();
        Ok(configured.unwrap_or_else(|| GatewaySubscription {
            id: subscription_id.to_string(),
            status: if at_period_end {
                "active".to_string()
            } else {
                "canceled".to_string()
            },
            cancel_at_period_end: at_period_end,
        }))
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record("verify_webhook")?;

        let state = self.inner.lock().unwrap();
        if state.reject_webhooks {
            return Err(PaymentError::invalid_webhook("Mock rejects webhooks"));
        }

        state
            .next_webhook_event
            .clone()
            .ok_or_else(|| PaymentError::invalid_webhook("No webhook event configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PlanId, UserId};

    fn checkout_request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            user_id: UserId::new(),
            email: "clara@example.com".to_string(),
            plan_id: PlanId::new(),
            success_url: "https://app.example.com/success".to_string(),
            cancel_url: "https://app.example.com/cancel".to_string(),
        }
    }

    #[tokio::test]
    async fn returns_default_checkout_session() {
        let mock = MockPaymentProvider::new();

        let session = mock.create_checkout_session(checkout_request()).await.unwrap();

        assert_eq!(session.id, "cs_mock");
        assert!(session.url.starts_with("https://checkout.example.com/"));
    }

    #[tokio::test]
    async fn returns_configured_checkout_session() {
        let mock = MockPaymentProvider::new();
        mock.set_checkout_session(CheckoutSession {
            id: "cs_configured".to_string(),
            url: "https://pay.example.com/cs_configured".to_string(),
            expires_at: 1704067200,
        });

        let session = mock.create_checkout_session(checkout_request()).await.unwrap();

        assert_eq!(session.id, "cs_configured");
    }

    #[tokio::test]
    async fn injected_error_surfaces_once() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::unavailable("Gateway down"));

        assert!(mock.create_checkout_session(checkout_request()).await.is_err());
        assert!(mock.create_checkout_session(checkout_request()).await.is_ok());
    }

    #[tokio::test]
    async fn rejecting_mock_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();

        let result = mock.verify_webhook(b"{}", "t=1,v1=ab").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn tracks_calls() {
        let mock = MockPaymentProvider::new();
        let _ = mock.cancel_subscription("sub_1", true).await;
        let _ = mock.verify_webhook(b"{}", "t=1,v1=ab").await;

        assert_eq!(mock.calls(), vec!["cancel_subscription", "verify_webhook"]);
    }
}
