//! PostgreSQL adapters - Database implementations for repository and reader ports.
//!
//! Each adapter holds a `PgPool` and maps rows to domain types:
//! - `PostgresFlashcardRepository` - Flashcard persistence and due queries
//! - `PostgresCatalogReader` / `PostgresCatalogRepository` - Track and lesson content
//! - `PostgresPaymentReader` / `PostgresPaymentRepository` - Payment facts and webhook upserts
//! - `PostgresEnrollmentRepository` - Manual track grants
//! - `PostgresPlanReader` - Subscription plan lookups
//! - `PostgresUserReader` - User accounts and family links
//! - `PostgresForumRepository` - Discussion threads and posts

mod catalog_reader;
mod catalog_repository;
mod enrollment_repository;
mod flashcard_repository;
mod forum_repository;
mod payment_reader;
mod payment_repository;
mod plan_reader;
mod user_reader;

pub use catalog_reader::PostgresCatalogReader;
pub use catalog_repository::PostgresCatalogRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use flashcard_repository::PostgresFlashcardRepository;
pub use forum_repository::PostgresForumRepository;
pub use payment_reader::PostgresPaymentReader;
pub use payment_repository::PostgresPaymentRepository;
pub use plan_reader::PostgresPlanReader;
pub use user_reader::PostgresUserReader;
