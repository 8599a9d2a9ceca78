//! HTTP adapter for catalog endpoints.
//!
//! Exposes the content catalog via REST:
//! - `GET /api/tracks` - Public track listing
//! - `GET /api/tracks/:id/lessons` - Public lesson metadata
//! - `GET /api/lessons/:id` - Full lesson body, entitlement gated
//! - `POST /api/admin/tracks` - Admin track upsert
//! - `POST /api/admin/lessons` - Admin lesson upsert

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CatalogAppState;
pub use routes::{admin_catalog_router, catalog_router};
