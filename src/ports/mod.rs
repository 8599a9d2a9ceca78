//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod catalog_reader;
mod catalog_repository;
mod enrollment_repository;
mod flashcard_repository;
mod forum_repository;
mod payment_provider;
mod payment_reader;
mod payment_repository;
mod plan_reader;
mod rate_limiter;
mod session_validator;
mod user_reader;

pub use catalog_reader::{CatalogReader, LessonSummary};
pub use catalog_repository::CatalogRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use flashcard_repository::FlashcardRepository;
pub use forum_repository::ForumRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, GatewaySubscription, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent,
};
pub use payment_reader::{BillingStatistics, PaymentReader, PlanTypeCounts, StatusCounts};
pub use payment_repository::PaymentRepository;
pub use plan_reader::PlanReader;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};
pub use session_validator::SessionValidator;
pub use user_reader::{UserAccount, UserReader};
