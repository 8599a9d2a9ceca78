//! PostgreSQL implementation of UserReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, UserRole};
use crate::ports::{UserAccount, UserReader};

/// PostgreSQL implementation of the UserReader port.
pub struct PostgresUserReader {
    pool: PgPool,
}

impl PostgresUserReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserAccountRow {
    id: Uuid,
    email: String,
    display_name: String,
    role: String,
    parent_id: Option<Uuid>,
}

fn parse_role(s: &str) -> Result<UserRole, DomainError> {
    match s.to_lowercase().as_str() {
        "student" => Ok(UserRole::Student),
        "admin" => Ok(UserRole::Admin),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid user role: {}", other),
        )),
    }
}

impl TryFrom<UserAccountRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: UserAccountRow) -> Result<Self, Self::Error> {
        Ok(UserAccount {
            id: UserId::from_uuid(row.id),
            email: row.email,
            display_name: row.display_name,
            role: parse_role(&row.role)?,
            parent_id: row.parent_id.map(UserId::from_uuid),
        })
    }
}

#[async_trait]
impl UserReader for PostgresUserReader {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserAccountRow> = sqlx::query_as(
            r#"
            SELECT id, email, display_name, role, parent_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find user: {}", e),
            )
        })?;

        row.map(UserAccount::try_from).transpose()
    }
}
