//! Read-side port for user accounts.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, UserRole};

/// A user account row as read by billing and auth flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    /// Set when this account is a dependent on another account's family plan.
    pub parent_id: Option<UserId>,
}

/// Read queries over user accounts.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Finds an account by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;
}
