//! PostgreSQL implementation of PlanReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{PlanType, SubscriptionPlan};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId};
use crate::ports::PlanReader;

/// PostgreSQL implementation of the PlanReader port.
pub struct PostgresPlanReader {
    pool: PgPool,
}

impl PostgresPlanReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    plan_type: String,
    price_cents: i64,
}

impl TryFrom<PlanRow> for SubscriptionPlan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let plan_type = PlanType::parse(&row.plan_type).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan type: {}", row.plan_type),
            )
        })?;

        Ok(SubscriptionPlan {
            id: PlanId::from_uuid(row.id),
            name: row.name,
            plan_type,
            price_cents: row.price_cents,
        })
    }
}

#[async_trait]
impl PlanReader for PostgresPlanReader {
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<SubscriptionPlan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, name, plan_type, price_cents
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find plan: {}", e),
            )
        })?;

        row.map(SubscriptionPlan::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_row_rejects_unknown_type() {
        let result = SubscriptionPlan::try_from(PlanRow {
            id: Uuid::new_v4(),
            name: "Corporate".to_string(),
            plan_type: "corporate".to_string(),
            price_cents: 9990,
        });
        assert!(result.is_err());
    }
}
