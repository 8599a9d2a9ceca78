//! Domain layer - pure types and business rules.
//!
//! Bounded contexts:
//! - `foundation` - shared ids, timestamps and errors
//! - `srs` - spaced-repetition flashcards and the review scheduler
//! - `billing` - payments, plans, enrollments and the entitlement resolver
//! - `catalog` - tracks and lessons
//! - `forum` - discussion threads and posts

pub mod billing;
pub mod catalog;
pub mod forum;
pub mod foundation;
pub mod srs;
