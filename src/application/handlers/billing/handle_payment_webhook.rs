//! HandlePaymentWebhookHandler - Command handler for gateway events.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Payment, PaymentStatus};
use crate::domain::foundation::{PaymentId, PlanId, Timestamp, UserId};
use crate::ports::{PaymentProvider, PaymentRepository};

/// Command carrying the raw webhook payload and its signature header.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: String,
}

/// Verifies the webhook signature, maps the event to a payment row and
/// upserts it. Replayed events upsert the same gateway reference, so
/// delivery retries are harmless.
pub struct HandlePaymentWebhookHandler {
    provider: Arc<dyn PaymentProvider>,
    payments: Arc<dyn PaymentRepository>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { provider, payments }
    }

    pub async fn handle(&self, cmd: HandlePaymentWebhookCommand) -> Result<(), BillingError> {
        let event = self
            .provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|_| BillingError::InvalidWebhookSignature)?;

        // Events without user metadata cannot be attributed; acknowledge
        // them so the gateway stops retrying.
        let Some(user_id) = event.user_id.as_deref() else {
            tracing::warn!(event_id = %event.id, "Payment event without user metadata, skipping");
            return Ok(());
        };

        let user_id: UserId = user_id.parse().map_err(|_| {
            BillingError::Validation(crate::domain::foundation::ValidationError::invalid_format(
                "user_id",
                "gateway metadata is not a UUID",
            ))
        })?;

        let plan_id = match event.plan_id.as_deref() {
            Some(raw) => Some(raw.parse::<PlanId>().map_err(|_| {
                BillingError::Validation(
                    crate::domain::foundation::ValidationError::invalid_format(
                        "plan_id",
                        "gateway metadata is not a UUID",
                    ),
                )
            })?),
            None => None,
        };

        let payment = Payment {
            id: PaymentId::new(),
            user_id,
            status: PaymentStatus::from_gateway(&event.status),
            plan_id,
            amount_cents: event.amount_cents,
            gateway_reference: event.payment_reference.clone(),
            created_at: Timestamp::from_unix_secs(event.created_at),
        };

        self.payments
            .upsert_by_gateway_reference(&payment)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        tracing::info!(
            event_id = %event.id,
            reference = %payment.gateway_reference,
            status = payment.status.as_str(),
            "Recorded payment event"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::ports::{
        CheckoutSession, CreateCheckoutRequest, GatewaySubscription, PaymentError, WebhookEvent,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPaymentProvider {
        event: Option<WebhookEvent>,
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            _request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Err(PaymentError::invalid_request("not used"))
        }

        async fn cancel_subscription(
            &self,
            _subscription_id: &str,
            _at_period_end: bool,
        ) -> Result<GatewaySubscription, PaymentError> {
            Err(PaymentError::invalid_request("not used"))
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            self.event
                .clone()
                .ok_or_else(|| PaymentError::invalid_webhook("bad signature"))
        }
    }

    #[derive(Default)]
    struct MockPaymentRepository {
        upserts: Mutex<Vec<Payment>>,
    }

    #[async_trait]
    impl PaymentRepository for MockPaymentRepository {
        async fn upsert_by_gateway_reference(&self, payment: &Payment) -> Result<(), DomainError> {
            self.upserts.lock().unwrap().push(payment.clone());
            Ok(())
        }
    }

    fn approved_event(user_id: UserId, plan_id: PlanId) -> WebhookEvent {
        WebhookEvent {
            id: "evt_1".to_string(),
            payment_reference: "pay_789".to_string(),
            user_id: Some(user_id.to_string()),
            plan_id: Some(plan_id.to_string()),
            status: "APPROVED".to_string(),
            amount_cents: 4990,
            created_at: 1_704_067_200,
        }
    }

    #[tokio::test]
    async fn approved_event_upserts_payment() {
        let user_id = UserId::new();
        let plan_id = PlanId::new();
        let payments = Arc::new(MockPaymentRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockPaymentProvider {
                event: Some(approved_event(user_id, plan_id)),
            }),
            payments.clone(),
        );

        handler
            .handle(HandlePaymentWebhookCommand {
                payload: b"{}".to_vec(),
                signature: "t=1,v1=abc".to_string(),
            })
            .await
            .unwrap();

        let upserts = payments.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].status, PaymentStatus::Approved);
        assert_eq!(upserts[0].gateway_reference, "pay_789");
        assert_eq!(upserts[0].user_id, user_id);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected() {
        let payments = Arc::new(MockPaymentRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockPaymentProvider { event: None }),
            payments.clone(),
        );

        let result = handler
            .handle(HandlePaymentWebhookCommand {
                payload: b"{}".to_vec(),
                signature: "garbage".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BillingError::InvalidWebhookSignature)));
        assert!(payments.upserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn event_without_user_metadata_is_acknowledged_and_skipped() {
        let mut event = approved_event(UserId::new(), PlanId::new());
        event.user_id = None;
        let payments = Arc::new(MockPaymentRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockPaymentProvider { event: Some(event) }),
            payments.clone(),
        );

        handler
            .handle(HandlePaymentWebhookCommand {
                payload: b"{}".to_vec(),
                signature: "t=1,v1=abc".to_string(),
            })
            .await
            .unwrap();

        assert!(payments.upserts.lock().unwrap().is_empty());
    }
}
