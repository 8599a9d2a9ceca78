//! Foundation layer - shared value objects for the whole domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    EnrollmentId, FlashcardId, LessonId, PaymentId, PlanId, PostId, ThreadId, TrackId, UserId,
};
pub use timestamp::Timestamp;
