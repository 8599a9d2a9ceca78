//! HTTP adapter for forum endpoints.
//!
//! Exposes the community forum via REST:
//! - `GET /api/forum/threads` - Thread index
//! - `POST /api/forum/threads` - Open a thread
//! - `GET /api/forum/threads/:id/posts` - A thread's replies
//! - `POST /api/forum/threads/:id/posts` - Reply to a thread

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ForumAppState;
pub use routes::{forum_router, forum_router_with_limits};
