//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Rate limit configuration for sensitive route groups
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Maximum requests per window per client IP
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window duration in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
}

impl RateLimitSettings {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_requests == 0 || self.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        Ok(())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_secs() -> u32 {
    60
}
