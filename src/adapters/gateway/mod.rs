//! Payment gateway adapter.
//!
//! Implements the `PaymentProvider` port against the gateway's HTTP API,
//! including:
//! - Hosted checkout sessions
//! - Subscription cancellation and plan changes
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - All secrets are handled via `secrecy::SecretString`

mod gateway_adapter;
mod mock_payment_provider;
mod webhook_types;

pub use gateway_adapter::{GatewayConfig, HttpPaymentGateway};
pub use mock_payment_provider::MockPaymentProvider;
pub use webhook_types::{
    GatewayCheckoutSession, GatewayPayment, GatewaySubscriptionObject, GatewayWebhookEvent,
    SignatureHeader, SignatureParseError,
};
