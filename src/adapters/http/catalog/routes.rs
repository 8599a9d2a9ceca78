//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_lesson, list_lessons, list_tracks, upsert_lesson, upsert_track, CatalogAppState,
};

/// Create the public catalog router.
///
/// # Routes
/// - `GET /tracks` - Public track listing
/// - `GET /tracks/:id/lessons` - Public lesson metadata for a track
/// - `GET /lessons/:id` - Full lesson body (auth, entitlement gated)
///
/// Suitable for mounting at `/api`.
pub fn catalog_router() -> Router<CatalogAppState> {
    Router::new()
        .route("/tracks", get(list_tracks))
        .route("/tracks/:id/lessons", get(list_lessons))
        .route("/lessons/:id", get(get_lesson))
}

/// Create the admin catalog router.
///
/// # Routes
/// - `POST /tracks` - Create or replace a track
/// - `POST /lessons` - Create or replace a lesson
///
/// Suitable for mounting at `/api/admin`. Handlers enforce the admin role
/// via `RequireAdmin`.
pub fn admin_catalog_router() -> Router<CatalogAppState> {
    Router::new()
        .route("/tracks", post(upsert_track))
        .route("/lessons", post(upsert_lesson))
}
