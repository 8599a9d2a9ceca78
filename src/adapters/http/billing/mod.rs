//! HTTP adapter for billing endpoints.
//!
//! Exposes entitlements and payments via REST:
//! - `GET /api/billing/subscription` - Current entitlement summary
//! - `GET /api/billing/tracks/:id/access` - Track access check
//! - `POST /api/billing/checkout` - Start gateway checkout
//! - `POST /api/billing/cancel` - Cancel subscription
//! - `GET /api/admin/billing/stats` - Billing statistics (admin)
//! - `POST /api/webhooks/payments` - Gateway webhook, HMAC-verified

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::{
    admin_billing_router, billing_router, billing_router_with_limits, webhook_router,
};
