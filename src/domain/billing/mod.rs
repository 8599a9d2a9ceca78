//! Billing context - payments, plans, enrollments and entitlement resolution.

mod enrollment;
mod entitlement;
mod errors;
mod payment;
mod plan;

pub use enrollment::Enrollment;
pub use entitlement::{
    subscription_access, track_access, PaymentFacts, SubscriptionAccess, TrackAccess,
};
pub use errors::BillingError;
pub use payment::{Payment, PaymentStatus};
pub use plan::{PlanType, SubscriptionPlan};
