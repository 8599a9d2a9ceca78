//! In-memory rate limiter implementation for testing and development.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Not suitable for production multi-server deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory rate limiter for testing and single-server deployments.
///
/// Uses a fixed-window counter algorithm. Each window tracks the count
/// of requests and resets when the window expires.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    /// Per-key window state.
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    /// Number of requests in the current window.
    count: u32,
    /// When the current window started.
    window_start: u64,
    /// Window duration in seconds.
    window_secs: u32,
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let store_key = key.to_store_key();
        let (limit, window_secs) = self.config.limits_for_group(&key.group);
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;

        let state = windows.entry(store_key).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
            window_secs,
        });

        // Check if window has expired
        let window_end = state.window_start + state.window_secs as u64;
        if now >= window_end {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after =
                (state.window_start + state.window_secs as u64).saturating_sub(now) as u32;

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                message: format!(
                    "Rate limit exceeded for {}. Retry after {} seconds.",
                    key, retry_after
                ),
            }));
        }

        state.count += 1;
        let remaining = limit.saturating_sub(state.count);
        let reset_at = Timestamp::from_unix_secs(state.window_start + state.window_secs as u64);

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining,
            reset_at,
            window_secs,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let store_key = key.to_store_key();
        let (limit, window_secs) = self.config.limits_for_group(&key.group);
        let now = Self::now_secs();

        let windows = self.windows.read().await;

        let (count, window_start) = windows
            .get(&store_key)
            .map(|state| {
                let window_end = state.window_start + state.window_secs as u64;
                if now >= window_end {
                    (0, now)
                } else {
                    (state.count, state.window_start)
                }
            })
            .unwrap_or((0, now));

        let remaining = limit.saturating_sub(count);
        let reset_at = Timestamp::from_unix_secs(window_start + window_secs as u64);

        Ok(RateLimitStatus {
            limit,
            remaining,
            reset_at,
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let store_key = key.to_store_key();
        let mut windows = self.windows.write().await;
        windows.remove(&store_key);
        Ok(())
    }
}
