//! Per-IP rate limiting middleware for sensitive route groups.
//!
//! Applied per route group (checkout, webhook, forum writes) via
//! `axum::middleware::from_fn_with_state`. Each group counts requests in a
//! fixed window keyed by client IP; the counter store is behind the
//! `RateLimiter` port.
//!
//! Window status is reported in standard headers:
//! - `X-RateLimit-Limit`: requests allowed per window
//! - `X-RateLimit-Remaining`: requests left in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: seconds to wait (only on 429)
//!
//! An unavailable counter store fails open: requests proceed and the outage
//! is logged.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{RateLimitKey, RateLimitResult, RateLimiter};

/// State for one rate-limited route group.
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<dyn RateLimiter>,
    group: &'static str,
}

impl RateLimitState {
    pub fn new(limiter: Arc<dyn RateLimiter>, group: &'static str) -> Self {
        Self { limiter, group }
    }
}

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Counts the request against the group's per-IP window.
///
/// Requests without a resolvable client IP pass through unlimited; routes
/// behind this middleware sit behind a proxy that always forwards one.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(client_ip) = extract_client_ip(&request, connect_info.as_ref()) else {
        tracing::warn!(group = state.group, "No client IP, skipping rate limit");
        return next.run(request).await;
    };

    let key = RateLimitKey::new(state.group, client_ip);
    let status = match state.limiter.check(key).await {
        Ok(RateLimitResult::Denied(denied)) => {
            return rate_limit_response(denied.limit, denied.retry_after_secs);
        }
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Err(e) => {
            // Fail open: an unavailable store never blocks requests.
            tracing::warn!(group = state.group, "Rate limiter unavailable: {}", e);
            None
        }
    };

    let mut response = next.run(request).await;

    if let Some(status) = status {
        add_rate_limit_headers(
            &mut response,
            status.limit,
            status.remaining,
            status.reset_at.as_unix_secs(),
        );
    }

    response
}

/// Extract client IP from the request, checking forwarded headers first.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // First IP is the client, before any proxies.
        if let Some(first_ip) = forwarded.split(',').next() {
            return Some(first_ip.trim().to_string());
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return Some(real_ip.to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// Create a 429 Too Many Requests response.
fn rate_limit_response(limit: u32, retry_after_secs: u32) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "error": "Rate limit exceeded",
            "code": "RATE_LIMIT_EXCEEDED",
            "retry_after_secs": retry_after_secs
        })),
    )
        .into_response();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from_static("0"),
    );
    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
        headers.insert("Retry-After", value);
    }

    response
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(response: &mut Response, limit: u32, remaining: u32, reset_at: u64) {
    let headers = response.headers_mut();
    for (name, value) in [
        (&headers::X_RATELIMIT_LIMIT, limit.to_string()),
        (&headers::X_RATELIMIT_REMAINING, remaining.to_string()),
        (&headers::X_RATELIMIT_RESET, reset_at.to_string()),
    ] {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name.clone(), value);
        }
    }
}
