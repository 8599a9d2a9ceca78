//! Rate limit configuration types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Rate limit configuration for sensitive route groups.
///
/// Every group shares the default fixed window unless an override exists
/// for its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window per client IP.
    pub max_requests: u32,
    /// Window duration in seconds.
    pub window_secs: u32,
    /// Per-group overrides keyed by group name ("checkout", "forum", ...).
    #[serde(default)]
    pub groups: HashMap<String, GroupLimits>,
}

/// Limits for a single route group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupLimits {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration in seconds.
    pub window_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_secs: 60,
            groups: HashMap::new(),
        }
    }
}

impl RateLimitConfig {
    /// Get the limit and window for a group.
    ///
    /// Returns (limit, window_secs) tuple.
    pub fn limits_for_group(&self, group: &str) -> (u32, u32) {
        self.groups
            .get(group)
            .map(|g| (g.max_requests, g.window_secs))
            .unwrap_or((self.max_requests, self.window_secs))
    }

    /// Set an override for a group.
    pub fn with_group(mut self, group: impl Into<String>, limits: GroupLimits) -> Self {
        self.groups.insert(group.into(), limits);
        self
    }
}
