//! Axum router configuration for forum endpoints.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::{rate_limit_middleware, RateLimitState};

use super::handlers::{create_post, create_thread, list_posts, list_threads, ForumAppState};

/// Create the forum API router.
///
/// # Routes
/// - `GET /threads` - Thread index (query: track_id)
/// - `POST /threads` - Open a thread (auth, rate limited)
/// - `GET /threads/:id/posts` - A thread's replies
/// - `POST /threads/:id/posts` - Reply to a thread (auth, rate limited)
///
/// Suitable for mounting at `/api/forum`.
pub fn forum_router() -> Router<ForumAppState> {
    Router::new()
        .route("/threads", get(list_threads).post(create_thread))
        .route("/threads/:id/posts", get(list_posts).post(create_post))
}

/// Create the forum API router with per-IP limits on posting.
///
/// Same routes as [`forum_router`], with fixed-window rate limiting applied
/// to the POST handlers. Reads stay unlimited.
pub fn forum_router_with_limits(post_limit: RateLimitState) -> Router<ForumAppState> {
    let limited = from_fn_with_state(post_limit, rate_limit_middleware);
    Router::new()
        .route("/threads", get(list_threads))
        .route("/threads/:id/posts", get(list_posts))
        .route("/threads", post(create_thread).route_layer(limited.clone()))
        .route("/threads/:id/posts", post(create_post).route_layer(limited))
}
