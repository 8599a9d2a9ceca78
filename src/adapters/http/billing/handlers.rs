//! HTTP handlers for billing endpoints.
//!
//! Entitlement queries, checkout/cancel commands against the payment
//! gateway, the admin statistics endpoint, and the signature-verified
//! gateway webhook.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::billing::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CheckSubscriptionHandler,
    CheckSubscriptionQuery, CheckTrackAccessHandler, CheckTrackAccessQuery, CreateCheckoutCommand,
    CreateCheckoutHandler, GetBillingStatsHandler, GetBillingStatsQuery,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
};
use crate::domain::billing::BillingError;
use crate::domain::foundation::{PlanId, TrackId, ValidationError};
use crate::ports::{
    EnrollmentRepository, PaymentProvider, PaymentReader, PaymentRepository, PlanReader,
    UserReader,
};

use super::dto::{
    CancelSubscriptionRequest, CheckoutRequest, CheckoutResponse, SubscriptionResponse,
    TrackAccessResponse,
};

/// Signature header sent by the payment gateway on webhook deliveries.
const SIGNATURE_HEADER: &str = "X-Gateway-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for billing endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub users: Arc<dyn UserReader>,
    pub payment_reader: Arc<dyn PaymentReader>,
    pub payment_repository: Arc<dyn PaymentRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub plans: Arc<dyn PlanReader>,
    pub provider: Arc<dyn PaymentProvider>,
}

impl BillingAppState {
    pub fn check_subscription_handler(&self) -> CheckSubscriptionHandler {
        CheckSubscriptionHandler::new(self.users.clone(), self.payment_reader.clone())
    }

    pub fn check_track_access_handler(&self) -> CheckTrackAccessHandler {
        CheckTrackAccessHandler::new(self.enrollments.clone(), self.check_subscription_handler())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.plans.clone(), self.provider.clone())
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.check_subscription_handler(), self.provider.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.provider.clone(), self.payment_repository.clone())
    }

    pub fn stats_handler(&self) -> GetBillingStatsHandler {
        GetBillingStatsHandler::new(self.payment_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/billing/subscription - Current entitlement summary.
pub async fn get_subscription(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, BillingApiError> {
    let result = state
        .check_subscription_handler()
        .handle(CheckSubscriptionQuery { user_id: user.id })
        .await?;

    Ok(Json(SubscriptionResponse::from(result.access)))
}

/// GET /api/billing/tracks/:id/access - Access check for one track.
pub async fn get_track_access(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Path(track_id): Path<TrackId>,
) -> Result<impl IntoResponse, BillingApiError> {
    let result = state
        .check_track_access_handler()
        .handle(CheckTrackAccessQuery {
            user_id: user.id,
            track_id,
        })
        .await?;

    Ok(Json(TrackAccessResponse::from(result.access)))
}

/// GET /api/admin/billing/stats - Payment counts by status and plan type.
pub async fn get_billing_stats(
    State(state): State<BillingAppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, BillingApiError> {
    let stats = state.stats_handler().handle(GetBillingStatsQuery {}).await?;

    Ok(Json(stats))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/billing/checkout - Start a gateway checkout.
pub async fn create_checkout(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let plan_id: PlanId = request.plan_id.parse().map_err(|_| {
        BillingError::Validation(ValidationError::invalid_format("plan_id", "not a UUID"))
    })?;

    let result = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            user_id: user.id,
            email: request.email,
            plan_id,
            success_url: request.success_url,
            cancel_url: request.cancel_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(result.session))))
}

/// POST /api/billing/cancel - Cancel the user's subscription.
pub async fn cancel_subscription(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CancelSubscriptionRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    state
        .cancel_subscription_handler()
        .handle(CancelSubscriptionCommand {
            user_id: user.id,
            gateway_subscription_id: request.gateway_subscription_id,
            at_period_end: !request.immediate,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/webhooks/payments - Gateway webhook, HMAC-verified.
///
/// No session auth: the signature header is the only credential.
pub async fn handle_payment_webhook(
    State(state): State<BillingAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, BillingApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(BillingError::InvalidWebhookSignature)?;

    state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
pub struct BillingApiError(BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            BillingError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            BillingError::TrackNotFound(_) => (StatusCode::NOT_FOUND, "TRACK_NOT_FOUND"),
            BillingError::NoActiveSubscription(_) => {
                (StatusCode::CONFLICT, "NO_ACTIVE_SUBSCRIPTION")
            }
            BillingError::InvalidWebhookSignature => {
                (StatusCode::UNAUTHORIZED, "INVALID_WEBHOOK_SIGNATURE")
            }
            BillingError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            BillingError::Gateway(msg) => {
                tracing::error!("Payment gateway call failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_ERROR")
            }
            BillingError::Infrastructure(msg) => {
                tracing::error!("Billing endpoint failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{
        Enrollment, Payment, PaymentFacts, PaymentStatus, PlanType, SubscriptionAccess,
        SubscriptionPlan, TrackAccess,
    };
    use crate::domain::foundation::{DomainError, UserId, UserRole};
    use crate::ports::{
        BillingStatistics, CheckoutSession, CreateCheckoutRequest, GatewaySubscription,
        PaymentError, UserAccount, WebhookEvent,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockUserReader {
        accounts: Vec<UserAccount>,
    }

    #[async_trait]
    impl UserReader for MockUserReader {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
            Ok(self.accounts.iter().find(|a| &a.id == id).cloned())
        }
    }

    #[derive(Default)]
    struct MockPaymentReader {
        facts: Vec<(UserId, Vec<PaymentFacts>)>,
    }

    #[async_trait]
    impl PaymentReader for MockPaymentReader {
        async fn subscription_payment_facts(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<PaymentFacts>, DomainError> {
            Ok(self
                .facts
                .iter()
                .find(|(id, _)| id == user_id)
                .map(|(_, facts)| facts.clone())
                .unwrap_or_default())
        }

        async fn get_statistics(&self) -> Result<BillingStatistics, DomainError> {
            Ok(BillingStatistics::default())
        }
    }

    #[derive(Default)]
    struct MockPaymentRepository {
        payments: Mutex<Vec<Payment>>,
    }

    #[async_trait]
    impl PaymentRepository for MockPaymentRepository {
        async fn upsert_by_gateway_reference(
            &self,
            payment: &Payment,
        ) -> Result<(), DomainError> {
            self.payments.lock().unwrap().push(payment.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockEnrollmentRepository {
        enrollments: Vec<Enrollment>,
    }

    #[async_trait]
    impl EnrollmentRepository for MockEnrollmentRepository {
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

    #[derive(Default)]
    struct MockPlanReader {
        plans: Vec<SubscriptionPlan>,
    }

    #[async_trait]
    impl PlanReader for MockPlanReader {
        async fn find_by_id(&self, id: &PlanId) -> Result<Option<SubscriptionPlan>, DomainError> {
            Ok(self.plans.iter().find(|p| &p.id == id).cloned())
        }
    }

    struct MockPaymentProvider {
        event: Option<WebhookEvent>,
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Ok(CheckoutSession {
                id: "cs_test".to_string(),
                url: format!("https://gateway.test/checkout/{}", request.plan_id),
                expires_at: 1_700_000_000,
            })
        }

        async fn cancel_subscription(
            &self,
            _subscription_id: &str,
            _at_period_end: bool,
        ) -> Result<GatewaySubscription, PaymentError> {
            Ok(GatewaySubscription {
                id: "sub_test".to_string(),
                status: "canceled".to_string(),
                cancel_at_period_end: true,
            })
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

    fn student_account(id: UserId) -> UserAccount {
        UserAccount {
            id,
            email: "aluno@example.com".to_string(),
            display_name: "Aluno".to_string(),
            role: UserRole::Student,
            parent_id: None,
        }
    }

    fn state(
        users: MockUserReader,
        payments: MockPaymentReader,
        plans: MockPlanReader,
        provider: MockPaymentProvider,
    ) -> BillingAppState {
        BillingAppState {
            users: Arc::new(users),
            payment_reader: Arc::new(payments),
            payment_repository: Arc::new(MockPaymentRepository::default()),
            enrollments: Arc::new(MockEnrollmentRepository::default()),
            plans: Arc::new(plans),
            provider: Arc::new(provider),
        }
    }

    #[tokio::test]
    async fn subscription_check_reports_direct_access() {
        let user_id = UserId::new();
        let state = state(
            MockUserReader {
                accounts: vec![student_account(user_id)],
            },
            MockPaymentReader {
                facts: vec![(
                    user_id,
                    vec![PaymentFacts {
                        status: PaymentStatus::Approved,
                        plan_type: Some(PlanType::Individual),
                    }],
                )],
            },
            MockPlanReader::default(),
            MockPaymentProvider { event: None },
        );

        let result = state
            .check_subscription_handler()
            .handle(CheckSubscriptionQuery { user_id })
            .await
            .unwrap();

        assert_eq!(result.access, SubscriptionAccess::Direct);
    }

    #[tokio::test]
    async fn track_access_falls_back_to_subscription() {
        let user_id = UserId::new();
        let state = state(
            MockUserReader {
                accounts: vec![student_account(user_id)],
            },
            MockPaymentReader {
                facts: vec![(
                    user_id,
                    vec![PaymentFacts {
                        status: PaymentStatus::Authorized,
                        plan_type: Some(PlanType::Individual),
                    }],
                )],
            },
            MockPlanReader::default(),
            MockPaymentProvider { event: None },
        );

        let result = state
            .check_track_access_handler()
            .handle(CheckTrackAccessQuery {
                user_id,
                track_id: TrackId::new(),
            })
            .await
            .unwrap();

        assert_eq!(
            result.access,
            TrackAccess::Subscription(SubscriptionAccess::Direct)
        );
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_plan() {
        let user_id = UserId::new();
        let state = state(
            MockUserReader {
                accounts: vec![student_account(user_id)],
            },
            MockPaymentReader::default(),
            MockPlanReader::default(),
            MockPaymentProvider { event: None },
        );

        let result = state
            .create_checkout_handler()
            .handle(CreateCheckoutCommand {
                user_id,
                email: "aluno@example.com".to_string(),
                plan_id: PlanId::new(),
                success_url: "https://app.test/ok".to_string(),
                cancel_url: "https://app.test/ko".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BillingError::Validation(_))));
    }

    #[tokio::test]
    async fn cancel_without_subscription_is_conflict() {
        let user_id = UserId::new();
        let state = state(
            MockUserReader {
                accounts: vec![student_account(user_id)],
            },
            MockPaymentReader::default(),
            MockPlanReader::default(),
            MockPaymentProvider { event: None },
        );

        let result = state
            .cancel_subscription_handler()
            .handle(CancelSubscriptionCommand {
                user_id,
                gateway_subscription_id: "sub_1".to_string(),
                at_period_end: true,
            })
            .await;

        assert!(matches!(result, Err(BillingError::NoActiveSubscription(_))));
    }

    #[test]
    fn invalid_signature_maps_to_401() {
        let response = BillingApiError(BillingError::InvalidWebhookSignature).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn no_active_subscription_maps_to_409() {
        let response =
            BillingApiError(BillingError::NoActiveSubscription(UserId::new())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn gateway_failure_maps_to_500() {
        let response = BillingApiError(BillingError::gateway("timeout")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
