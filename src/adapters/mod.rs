//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token validation (OIDC JWT, mock)
//! - `gateway` - Payment gateway HTTP client and webhook verification
//! - `http` - Axum route handlers, DTOs, and middleware
//! - `postgres` - PostgreSQL-backed repositories and readers
//! - `rate_limiter` - Fixed-window rate limiting (in-memory, Redis)

pub mod auth;
pub mod gateway;
pub mod http;
pub mod postgres;
pub mod rate_limiter;
