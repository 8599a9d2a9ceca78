//! Integration tests for the billing and entitlement flow.
//!
//! These tests verify the end-to-end flow:
//! 1. HandlePaymentWebhookHandler verifies the event and upserts a payment
//! 2. CheckSubscriptionHandler resolves direct and family access
//! 3. CheckTrackAccessHandler prefers enrollments, falls back to subscriptions
//!
//! Uses in-memory implementations plus the mock payment provider to test the
//! flow without external dependencies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use clara_backend::adapters::gateway::MockPaymentProvider;
use clara_backend::application::handlers::billing::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, CheckTrackAccessHandler,
    CheckTrackAccessQuery, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
};
use clara_backend::domain::billing::{
    BillingError, Enrollment, Payment, PaymentFacts, PaymentStatus, PlanType,
    SubscriptionAccess, TrackAccess,
};
use clara_backend::domain::foundation::{DomainError, Timestamp, TrackId, UserId, UserRole};
use clara_backend::ports::{
    BillingStatistics, EnrollmentRepository, PaymentReader, PaymentRepository, UserAccount,
    UserReader, WebhookEvent,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory user directory for testing
struct TestUserReader {
    users: HashMap<UserId, UserAccount>,
}

impl TestUserReader {
    fn with(users: Vec<UserAccount>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

#[async_trait]
impl UserReader for TestUserReader {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.get(id).cloned())
    }
}

/// In-memory payment facts for testing
struct TestPaymentReader {
    facts: HashMap<UserId, Vec<PaymentFacts>>,
}

impl TestPaymentReader {
    fn with(facts: Vec<(UserId, Vec<PaymentFacts>)>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PaymentReader for TestPaymentReader {
    async fn subscription_payment_facts(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentFacts>, DomainError> {
        Ok(self.facts.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_statistics(&self) -> Result<BillingStatistics, DomainError> {
        Ok(BillingStatistics::default())
    }
}

/// In-memory payment store that captures upserts for assertions
struct TestPaymentRepository {
    payments: Mutex<Vec<Payment>>,
}

impl TestPaymentRepository {
    fn new() -> Self {
        Self {
            payments: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentRepository for TestPaymentRepository {
    async fn upsert_by_gateway_reference(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.lock().unwrap();
        if let Some(pos) = payments
            .iter()
            .position(|p| p.gateway_reference == payment.gateway_reference)
        {
            payments[pos] = payment.clone();
        } else {
            payments.push(payment.clone());
        }
        Ok(())
    }
}

/// In-memory enrollment store for testing
struct TestEnrollmentRepository {
    enrollments: Vec<Enrollment>,
}

impl TestEnrollmentRepository {
    fn with(enrollments: Vec<Enrollment>) -> Self {
        Self { enrollments }
    }
}

#[async_trait]
impl EnrollmentRepository for TestEnrollmentRepository {
    async fn find_for_track(
        &self,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .iter()
            .find(|e| &e.user_id == user_id && &e.track_id == track_id)
            .cloned())
    }
}

fn student(id: UserId, parent_id: Option<UserId>) -> UserAccount {
    UserAccount {
        id,
        email: "aluno@example.com".to_string(),
        display_name: "Aluno".to_string(),
        role: UserRole::Student,
        parent_id,
    }
}

fn approved(plan_type: PlanType) -> PaymentFacts {
    PaymentFacts {
        status: PaymentStatus::Approved,
        plan_type: Some(plan_type),
    }
}

fn subscription_handler(
    users: TestUserReader,
    payments: TestPaymentReader,
) -> CheckSubscriptionHandler {
    CheckSubscriptionHandler::new(Arc::new(users), Arc::new(payments))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn webhook_event_becomes_a_payment_row() {
    let user_id = UserId::new();
    let provider = Arc::new(MockPaymentProvider::new());
    provider.set_webhook_event(WebhookEvent {
        id: "evt_1".to_string(),
        payment_reference: "pay_123".to_string(),
        user_id: Some(user_id.to_string()),
        plan_id: None,
        status: "APPROVED".to_string(),
        amount_cents: 4990,
        created_at: 1_700_000_000,
    });

    let repository = Arc::new(TestPaymentRepository::new());
    HandlePaymentWebhookHandler::new(provider, repository.clone())
        .handle(HandlePaymentWebhookCommand {
            payload: b"{}".to_vec(),
            signature: "t=1,v1=ab".to_string(),
        })
        .await
        .unwrap();

    let recorded = repository.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].user_id, user_id);
    assert_eq!(recorded[0].status, PaymentStatus::Approved);
    assert_eq!(recorded[0].gateway_reference, "pay_123");
    assert_eq!(recorded[0].amount_cents, 4990);
}

#[tokio::test]
async fn replayed_webhook_upserts_the_same_reference() {
    let user_id = UserId::new();
    let provider = Arc::new(MockPaymentProvider::new());
    let repository = Arc::new(TestPaymentRepository::new());
    let handler = HandlePaymentWebhookHandler::new(provider.clone(), repository.clone());

    for status in ["pending", "approved"] {
        provider.set_webhook_event(WebhookEvent {
            id: format!("evt_{status}"),
            payment_reference: "pay_retry".to_string(),
            user_id: Some(user_id.to_string()),
            plan_id: None,
            status: status.to_string(),
            amount_cents: 4990,
            created_at: 1_700_000_000,
        });
        handler
            .handle(HandlePaymentWebhookCommand {
                payload: b"{}".to_vec(),
                signature: "t=1,v1=ab".to_string(),
            })
            .await
            .unwrap();
    }

    let recorded = repository.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].status, PaymentStatus::Approved);
}

#[tokio::test]
async fn rejected_signature_records_nothing() {
    let provider = Arc::new(MockPaymentProvider::rejecting_webhooks());
    let repository = Arc::new(TestPaymentRepository::new());

    let result = HandlePaymentWebhookHandler::new(provider, repository.clone())
        .handle(HandlePaymentWebhookCommand {
            payload: b"{}".to_vec(),
            signature: "t=1,v1=bad".to_string(),
        })
        .await;

    assert!(matches!(result, Err(BillingError::InvalidWebhookSignature)));
    assert!(repository.recorded().is_empty());
}

#[tokio::test]
async fn dependent_inherits_the_parent_family_plan() {
    let parent_id = UserId::new();
    let child_id = UserId::new();

    let handler = subscription_handler(
        TestUserReader::with(vec![
            student(parent_id, None),
            student(child_id, Some(parent_id)),
        ]),
        TestPaymentReader::with(vec![(parent_id, vec![approved(PlanType::Family)])]),
    );

    let result = handler
        .handle(CheckSubscriptionQuery { user_id: child_id })
        .await
        .unwrap();

    assert_eq!(result.access, SubscriptionAccess::Family);
}

#[tokio::test]
async fn parent_individual_plan_grants_nothing_to_dependents() {
    let parent_id = UserId::new();
    let child_id = UserId::new();

    let handler = subscription_handler(
        TestUserReader::with(vec![
            student(parent_id, None),
            student(child_id, Some(parent_id)),
        ]),
        TestPaymentReader::with(vec![(parent_id, vec![approved(PlanType::Individual)])]),
    );

    let result = handler
        .handle(CheckSubscriptionQuery { user_id: child_id })
        .await
        .unwrap();

    assert_eq!(result.access, SubscriptionAccess::None);
}

#[tokio::test]
async fn active_enrollment_wins_without_a_subscription() {
    let user_id = UserId::new();
    let track_id = TrackId::new();

    let handler = CheckTrackAccessHandler::new(
        Arc::new(TestEnrollmentRepository::with(vec![Enrollment::lifetime(
            user_id, track_id,
        )])),
        subscription_handler(
            TestUserReader::with(vec![student(user_id, None)]),
            TestPaymentReader::with(vec![]),
        ),
    );

    let result = handler
        .handle(CheckTrackAccessQuery { user_id, track_id })
        .await
        .unwrap();

    assert_eq!(result.access, TrackAccess::Enrolled);
}

#[tokio::test]
async fn expired_enrollment_falls_back_to_the_subscription() {
    let user_id = UserId::new();
    let track_id = TrackId::new();
    let expired = Enrollment::until(user_id, track_id, Timestamp::now().minus_days(30));

    let handler = CheckTrackAccessHandler::new(
        Arc::new(TestEnrollmentRepository::with(vec![expired])),
        subscription_handler(
            TestUserReader::with(vec![student(user_id, None)]),
            TestPaymentReader::with(vec![(user_id, vec![approved(PlanType::Individual)])]),
        ),
    );

    let result = handler
        .handle(CheckTrackAccessQuery { user_id, track_id })
        .await
        .unwrap();

    assert_eq!(
        result.access,
        TrackAccess::Subscription(SubscriptionAccess::Direct)
    );
}

#[tokio::test]
async fn expired_enrollment_alone_denies_access() {
    let user_id = UserId::new();
    let track_id = TrackId::new();
    let expired = Enrollment::until(user_id, track_id, Timestamp::now().minus_days(1));

    let handler = CheckTrackAccessHandler::new(
        Arc::new(TestEnrollmentRepository::with(vec![expired])),
        subscription_handler(
            TestUserReader::with(vec![student(user_id, None)]),
            TestPaymentReader::with(vec![]),
        ),
    );

    let result = handler
        .handle(CheckTrackAccessQuery { user_id, track_id })
        .await
        .unwrap();

    assert_eq!(result.access, TrackAccess::Denied);
}
