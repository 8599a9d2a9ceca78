//! PostgreSQL implementation of PaymentReader.
//!
//! Serves the entitlement resolver and the admin statistics endpoint.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::billing::{PaymentFacts, PaymentStatus, PlanType};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{BillingStatistics, PaymentReader, PlanTypeCounts, StatusCounts};

/// PostgreSQL implementation of the PaymentReader port.
pub struct PostgresPaymentReader {
    pool: PgPool,
}

impl PostgresPaymentReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentFactsRow {
    status: String,
    plan_type: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct StatusCountRow {
    status: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct PlanTypeCountRow {
    plan_type: String,
    count: i64,
}

impl From<PaymentFactsRow> for PaymentFacts {
    fn from(row: PaymentFactsRow) -> Self {
        // Stored statuses come straight from the gateway; the same lenient
        // parsing applies on the way back out.
        PaymentFacts {
            status: PaymentStatus::from_gateway(&row.status),
            plan_type: row.plan_type.as_deref().and_then(PlanType::parse),
        }
    }
}

#[async_trait]
impl PaymentReader for PostgresPaymentReader {
    async fn subscription_payment_facts(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentFacts>, DomainError> {
        let rows: Vec<PaymentFactsRow> = sqlx::query_as(
            r#"
            SELECT p.status, pl.plan_type
            FROM payments p
            JOIN plans pl ON pl.id = p.plan_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to read payment facts: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(PaymentFacts::from).collect())
    }

    async fn get_statistics(&self) -> Result<BillingStatistics, DomainError> {
        let status_rows: Vec<StatusCountRow> = sqlx::query_as(
            r#"
            SELECT lower(status) as status, COUNT(*) as count
            FROM payments
            GROUP BY lower(status)
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count payments by status: {}", e),
            )
        })?;

        let mut by_status = StatusCounts::default();
        for row in status_rows {
            match row.status.as_str() {
                "pending" => by_status.pending = row.count as u64,
                "approved" => by_status.approved = row.count as u64,
                "authorized" => by_status.authorized = row.count as u64,
                "rejected" => by_status.rejected = row.count as u64,
                "refunded" => by_status.refunded = row.count as u64,
                _ => {}
            }
        }

        let plan_rows: Vec<PlanTypeCountRow> = sqlx::query_as(
            r#"
            SELECT pl.plan_type, COUNT(*) as count
            FROM payments p
            JOIN plans pl ON pl.id = p.plan_id
            WHERE lower(p.status) IN ('approved', 'authorized')
            GROUP BY pl.plan_type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count paid subscriptions: {}", e),
            )
        })?;

        let mut paid_by_plan_type = PlanTypeCounts::default();
        for row in plan_rows {
            match row.plan_type.to_lowercase().as_str() {
                "individual" => paid_by_plan_type.individual = row.count as u64,
                "family" => paid_by_plan_type.family = row.count as u64,
                _ => {}
            }
        }

        Ok(BillingStatistics {
            by_status,
            paid_by_plan_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_row_normalizes_status_casing() {
        let facts = PaymentFacts::from(PaymentFactsRow {
            status: "APPROVED".to_string(),
            plan_type: Some("FAMILY".to_string()),
        });
        assert_eq!(facts.status, PaymentStatus::Approved);
        assert_eq!(facts.plan_type, Some(PlanType::Family));
    }

    #[test]
    fn facts_row_maps_unknown_plan_type_to_none() {
        let facts = PaymentFacts::from(PaymentFactsRow {
            status: "approved".to_string(),
            plan_type: Some("corporate".to_string()),
        });
        assert!(facts.plan_type.is_none());
    }
}
