//! Port for fixed-window request rate limiting.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Timestamp;

/// Key identifying one counter window: a client IP within a route group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    /// Route group the limit applies to ("checkout", "forum", ...).
    pub group: String,
    /// Client IP the counter is scoped to.
    pub ip: String,
}

impl RateLimitKey {
    pub fn new(group: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ip: ip.into(),
        }
    }

    /// Renders the key for the counter store.
    pub fn to_store_key(&self) -> String {
        format!("ratelimit:{}:ip:{}", self.group, self.ip)
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.ip)
    }
}

/// Status of an allowed request's window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Timestamp,
    pub window_secs: u32,
}

/// Details of a denied request.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    pub retry_after_secs: u32,
    pub message: String,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    Allowed(RateLimitStatus),
    Denied(RateLimitDenied),
}

/// Errors from the counter store.
///
/// Callers treat these as fail-open: an unavailable store never blocks
/// requests.
#[derive(Debug, Clone, Error)]
pub enum RateLimitError {
    #[error("Rate limit store unavailable: {0}")]
    Unavailable(String),
}

/// Fixed-window rate limiter over a counter store.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Counts a request against the key's window and reports the outcome.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Reads the window status without consuming a request.
    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError>;

    /// Clears the key's counter.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_key_includes_group_and_ip() {
        let key = RateLimitKey::new("checkout", "203.0.113.7");
        assert_eq!(key.to_store_key(), "ratelimit:checkout:ip:203.0.113.7");
    }
}
