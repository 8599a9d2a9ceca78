//! Payment gateway adapter.
//!
//! Implements the `PaymentProvider` trait against the gateway's HTTP API.
//! Handles hosted checkout sessions, subscription mutations, and webhook
//! signature verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, GatewaySubscription, PaymentError, PaymentProvider,
    WebhookEvent,
};

use super::webhook_types::{
    hex_encode, GatewayCheckoutSession, GatewayPayment, GatewaySubscriptionObject,
    GatewayWebhookEvent, SignatureHeader,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Gateway API configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Secret API key used for HTTP authentication.
    api_key: SecretString,

    /// Webhook signing secret.
    webhook_secret: SecretString,

    /// Base URL for the gateway API.
    api_base_url: String,
}

impl GatewayConfig {
    /// Create a new gateway configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.payments.example.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing or sandbox environments).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// HTTP payment gateway adapter.
///
/// Implements `PaymentProvider` against the gateway's REST API.
pub struct HttpPaymentGateway {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl HttpPaymentGateway {
    /// Create a new gateway adapter with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// Uses constant-time comparison and validates the timestamp to
    /// prevent replay attacks.
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature over "timestamp.payload"
        let signed_payload = format!("{}.{}", header.timestamp, String::from_utf8_lossy(payload));

        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .expect("HMAC can take key of any size");

        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison
        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!(
                expected_signature = hex_encode(expected_bytes),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a gateway event payload and convert to the port's event type.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let gateway_event: GatewayWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        let payment: GatewayPayment = serde_json::from_value(gateway_event.data.object)
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid payment object: {}", e)))?;

        Ok(WebhookEvent {
            id: gateway_event.id,
            payment_reference: payment.id,
            user_id: payment.metadata.get("user_id").cloned(),
            plan_id: payment.metadata.get("plan_id").cloned(),
            status: payment.status,
            amount_cents: payment.amount_cents,
            created_at: gateway_event.created.max(0) as u64,
        })
    }

    async fn parse_subscription_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GatewaySubscription, PaymentError> {
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Gateway subscription call failed");
            return Err(PaymentError::invalid_request(format!(
                "Gateway API error: {}",
                error_text
            )));
        }

        let sub: GatewaySubscriptionObject = response.json().await.map_err(|e| {
            PaymentError::unavailable(format!("Failed to parse gateway response: {}", e))
        })?;

        Ok(GatewaySubscription {
            id: sub.id,
            status: sub.status,
            cancel_at_period_end: sub.cancel_at_period_end,
        })
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = vec![
            ("mode", "subscription".to_string()),
            ("customer_email", request.email),
            ("plan_id", request.plan_id.to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[user_id]", request.user_id.to_string()),
            ("metadata[plan_id]", request.plan_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Gateway create_checkout_session failed");
            return Err(PaymentError::invalid_request(format!(
                "Gateway API error: {}",
                error_text
            )));
        }

        let session: GatewayCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::unavailable(format!("Failed to parse gateway response: {}", e))
        })?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
            expires_at: session.expires_at,
        })
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Result<GatewaySubscription, PaymentError> {
        let url = format!(
            "{}/v1/subscriptions/{}",
            self.config.api_base_url, subscription_id
        );

        let response = if at_period_end {
            // Flag the subscription to lapse at the period boundary
            self.http_client
                .post(&url)
                .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
                .form(&[("cancel_at_period_end", "true")])
                .send()
                .await
        } else {
            // Immediately cancel
            self.http_client
                .delete(&url)
                .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
                .send()
                .await
        }
        .map_err(|e| PaymentError::unavailable(e.to_string()))?;

        self.parse_subscription_response(response).await
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        self.verify_signature(payload, &header)?;

        // 3. Parse and convert event
        let event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %event.id,
            payment_reference = %event.payment_reference,
            "Webhook signature verified"
        );

        Ok(event)
    }
}
