//! Port for the third-party payment gateway.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{PlanId, UserId};

/// Request to start a hosted checkout for a subscription plan.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    pub user_id: UserId,
    pub email: String,
    pub plan_id: PlanId,
    pub success_url: String,
    pub cancel_url: String,
}

/// A hosted checkout session created at the gateway.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
    pub expires_at: u64,
}

/// A gateway-side subscription after a mutation.
#[derive(Debug, Clone)]
pub struct GatewaySubscription {
    pub id: String,
    pub status: String,
    pub cancel_at_period_end: bool,
}

/// A payment event delivered via webhook, already signature-verified.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Gateway event id, unique per delivery.
    pub id: String,
    /// Gateway's id for the payment this event describes.
    pub payment_reference: String,
    /// Platform user the payment belongs to (gateway metadata).
    pub user_id: Option<String>,
    /// Platform plan the payment references (gateway metadata).
    pub plan_id: Option<String>,
    /// Raw gateway status string (e.g. "approved", "AUTHORIZED").
    pub status: String,
    pub amount_cents: i64,
    pub created_at: u64,
}

/// Error categories for gateway calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    InvalidWebhook,
    GatewayUnavailable,
    InvalidRequest,
}

/// Errors returned by the payment provider.
#[derive(Debug, Clone, Error)]
#[error("{code:?}: {message}")]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
}

impl PaymentError {
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self {
            code: PaymentErrorCode::InvalidWebhook,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: PaymentErrorCode::GatewayUnavailable,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: PaymentErrorCode::InvalidRequest,
            message: message.into(),
        }
    }
}

/// Payment gateway operations the platform consumes.
///
/// The concrete adapter talks HTTP; the mock serves tests. Webhook
/// signature verification lives behind this port so route handlers stay
/// gateway-agnostic.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a hosted checkout session for a plan purchase.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Cancels a gateway subscription, at period end or immediately.
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Result<GatewaySubscription, PaymentError>;

    /// Verifies a webhook payload's signature and parses the event.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}
