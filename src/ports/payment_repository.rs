//! Write-side port for payment rows.

use async_trait::async_trait;

use crate::domain::billing::Payment;
use crate::domain::foundation::DomainError;

/// Persistence for payments recorded from gateway events.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts or updates a payment keyed by its gateway reference.
    ///
    /// Webhook replays carry the same reference, so re-applying an event is
    /// a no-op update rather than a duplicate row.
    async fn upsert_by_gateway_reference(&self, payment: &Payment) -> Result<(), DomainError>;
}
