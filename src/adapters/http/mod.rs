//! HTTP adapters - REST API implementations.
//!
//! Each bounded context has its own HTTP adapter (dto, handlers, routes)
//! plus shared middleware and the common error body.

pub mod billing;
pub mod catalog;
pub mod error;
pub mod flashcards;
pub mod forum;
pub mod middleware;

pub use billing::{
    admin_billing_router, billing_router, billing_router_with_limits, webhook_router,
    BillingAppState,
};
pub use catalog::{admin_catalog_router, catalog_router, CatalogAppState};
pub use error::ErrorResponse;
pub use flashcards::{flashcards_router, FlashcardsAppState};
pub use forum::{forum_router, forum_router_with_limits, ForumAppState};
