//! Port for session token validation.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates a bearer session token into an authenticated user.
///
/// Keeps the middleware identity-provider agnostic; production uses signed
/// JWTs, tests use a mock.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
