//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::billing::Payment;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PaymentRepository;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn upsert_by_gateway_reference(&self, payment: &Payment) -> Result<(), DomainError> {
        // Webhook retries carry the same gateway reference; the conflict arm
        // refreshes the status instead of inserting a duplicate row.
        sqlx::query(
            r#"
            INSERT INTO payments (id, user_id, status, plan_id, amount_cents, gateway_reference, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (gateway_reference)
            DO UPDATE SET status = EXCLUDED.status, amount_cents = EXCLUDED.amount_cents
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.status.as_str())
        .bind(payment.plan_id.as_ref().map(|id| *id.as_uuid()))
        .bind(payment.amount_cents)
        .bind(&payment.gateway_reference)
        .bind(payment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert payment: {}", e),
            )
        })?;

        Ok(())
    }
}
