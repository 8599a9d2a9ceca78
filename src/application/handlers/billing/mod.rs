//! Use-case handlers for the billing context.

mod cancel_subscription;
mod check_subscription;
mod check_track_access;
mod create_checkout;
mod get_billing_stats;
mod handle_payment_webhook;

pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use check_subscription::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, CheckSubscriptionResult,
};
pub use check_track_access::{
    CheckTrackAccessHandler, CheckTrackAccessQuery, CheckTrackAccessResult,
};
pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use get_billing_stats::{GetBillingStatsHandler, GetBillingStatsQuery};
pub use handle_payment_webhook::{HandlePaymentWebhookCommand, HandlePaymentWebhookHandler};
