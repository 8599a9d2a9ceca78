//! Error type for the billing context.

use thiserror::Error;

use crate::domain::foundation::{TrackId, UserId, ValidationError};

/// Errors raised by billing and entitlement use cases.
#[derive(Debug, Clone, Error)]
pub enum BillingError {
    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("Track {0} not found")]
    TrackNotFound(TrackId),

    #[error("No active subscription for user {0}")]
    NoActiveSubscription(UserId),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Invalid webhook signature")]
    InvalidWebhookSignature,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl BillingError {
    pub fn gateway(message: impl Into<String>) -> Self {
        BillingError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }
}
