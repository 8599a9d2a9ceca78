//! HTTP middleware for axum.
//!
//! Cross-cutting request concerns:
//!
//! - `auth` - Bearer token validation and the auth extractors
//! - `rate_limit` - Per-IP fixed-window limiting for sensitive route groups

pub mod auth;
pub mod rate_limit;

pub use auth::{
    auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAdmin, RequireAuth,
};
pub use rate_limit::{rate_limit_middleware, RateLimitState};
