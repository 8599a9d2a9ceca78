//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port without a real identity provider.
//!
//! # Example
//!
//! ```ignore
//! use clara_backend::adapters::auth::MockSessionValidator;
//! use clara_backend::domain::foundation::{AuthenticatedUser, UserId, UserRole};
//!
//! let validator = MockSessionValidator::new().with_user(
//!     "valid-token",
//!     AuthenticatedUser {
//!         id: UserId::new(),
//!         email: "aluno@example.com".to_string(),
//!         role: UserRole::Student,
//!     },
//! );
//!
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    ///
    /// When `validate()` is called with this token, it returns the associated user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token with a fresh student user.
    pub fn with_student(self, token: impl Into<String>, email: impl Into<String>) -> Self {
        self.with_user(
            token,
            AuthenticatedUser {
                id: UserId::new(),
                email: email.into(),
                role: UserRole::Student,
            },
        )
    }

    /// Adds a valid token with a fresh admin user.
    pub fn with_admin(self, token: impl Into<String>, email: impl Into<String>) -> Self {
        self.with_user(
            token,
            AuthenticatedUser {
                id: UserId::new(),
                email: email.into(),
                role: UserRole::Admin,
            },
        )
    }

    /// Forces all validations to return the specified error.
    ///
    /// Useful for testing error handling paths.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            email: "aluno@example.com".to_string(),
            role: UserRole::Student,
        }
    }

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator = MockSessionValidator::new().with_user("valid-token", test_user());

        let user = validator.validate("valid-token").await.unwrap();

        assert_eq!(user.email, "aluno@example.com");
        assert_eq!(user.role, UserRole::Student);
    }

    #[tokio::test]
    async fn returns_invalid_token_for_unknown() {
        let validator = MockSessionValidator::new();

        let result = validator.validate("unknown-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn with_admin_creates_admin_user() {
        let validator = MockSessionValidator::new().with_admin("admin-token", "clara@example.com");

        let user = validator.validate("admin-token").await.unwrap();

        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.email, "clara@example.com");
    }

    #[tokio::test]
    async fn with_error_forces_error() {
        let validator = MockSessionValidator::new()
            .with_user("valid-token", test_user())
            .with_error(AuthError::ServiceUnavailable("Test error".to_string()));

        let result = validator.validate("valid-token").await;

        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn clear_error_restores_normal_operation() {
        let validator = MockSessionValidator::new()
            .with_user("valid-token", test_user())
            .with_error(AuthError::ServiceUnavailable("Test".to_string()));

        assert!(validator.validate("valid-token").await.is_err());

        validator.clear_error();

        assert!(validator.validate("valid-token").await.is_ok());
    }

    #[tokio::test]
    async fn add_token_works_at_runtime() {
        let validator = MockSessionValidator::new();

        assert!(validator.validate("new-token").await.is_err());

        validator.add_token("new-token", test_user());

        assert!(validator.validate("new-token").await.is_ok());
    }

    #[tokio::test]
    async fn remove_token_invalidates() {
        let validator = MockSessionValidator::new().with_user("token", test_user());

        assert!(validator.validate("token").await.is_ok());

        validator.remove_token("token");

        assert!(validator.validate("token").await.is_err());
    }

    #[test]
    fn token_count_tracks_tokens() {
        let validator = MockSessionValidator::new()
            .with_student("t1", "a@example.com")
            .with_student("t2", "b@example.com");

        assert_eq!(validator.token_count(), 2);
    }
}
