//! Authenticated identity types shared by middleware and handlers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

impl UserRole {
    /// Whether the role grants access to the admin back-office.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Authenticated user context derived from a validated session token.
///
/// Injected into request extensions by the auth middleware and read by the
/// `RequireAuth` / `RequireAdmin` extractors.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
}

/// Errors produced while validating a session token.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Session token has expired")]
    TokenExpired,

    #[error("Session token is invalid")]
    InvalidToken,

    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
