//! GetBillingStatsHandler - Query handler for admin billing statistics.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingStatistics, PaymentReader};

/// Query for aggregate payment counts.
#[derive(Debug, Clone)]
pub struct GetBillingStatsQuery {}

pub struct GetBillingStatsHandler {
    payment_reader: Arc<dyn PaymentReader>,
}

impl GetBillingStatsHandler {
    pub fn new(payment_reader: Arc<dyn PaymentReader>) -> Self {
        Self { payment_reader }
    }

    pub async fn handle(
        &self,
        _query: GetBillingStatsQuery,
    ) -> Result<BillingStatistics, BillingError> {
        self.payment_reader
            .get_statistics()
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))
    }
}
