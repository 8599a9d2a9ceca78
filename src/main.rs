//! Service entry point.
//!
//! Loads configuration from the environment, connects to Postgres and Redis,
//! wires the adapters into the per-context application states and serves the
//! REST API under `/api` until SIGTERM or Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clara_backend::adapters::auth::{JwtSessionValidator, JwtValidatorConfig};
use clara_backend::adapters::gateway::{GatewayConfig, HttpPaymentGateway};
use clara_backend::adapters::http::middleware::{auth_middleware, AuthState, RateLimitState};
use clara_backend::adapters::http::{
    admin_billing_router, admin_catalog_router, billing_router_with_limits, catalog_router,
    flashcards_router, forum_router_with_limits, webhook_router, BillingAppState,
    CatalogAppState, FlashcardsAppState, ForumAppState,
};
use clara_backend::adapters::postgres::{
    PostgresCatalogReader, PostgresCatalogRepository, PostgresEnrollmentRepository,
    PostgresFlashcardRepository, PostgresForumRepository, PostgresPaymentReader,
    PostgresPaymentRepository, PostgresPlanReader, PostgresUserReader,
};
use clara_backend::adapters::rate_limiter::{RateLimitConfig, RedisRateLimiter};
use clara_backend::config::AppConfig;
use clara_backend::ports::{
    EnrollmentRepository, PaymentProvider, PaymentReader, RateLimiter, UserReader,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        "Starting Francês com Clara backend"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Connected to Postgres");

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = tokio::time::timeout(
        config.redis.timeout(),
        redis_client.get_multiplexed_tokio_connection(),
    )
    .await??;
    tracing::info!("Connected to Redis");

    let limiter: Arc<dyn RateLimiter> = Arc::new(RedisRateLimiter::new(
        redis_conn,
        RateLimitConfig {
            max_requests: config.rate_limit.max_requests,
            window_secs: config.rate_limit.window_secs,
            ..RateLimitConfig::default()
        },
    ));

    let mut gateway_config = GatewayConfig::new(
        &config.payment.gateway_api_key,
        &config.payment.gateway_webhook_secret,
    );
    if let Some(url) = &config.payment.gateway_base_url {
        gateway_config = gateway_config.with_base_url(url);
    }
    let provider: Arc<dyn PaymentProvider> = Arc::new(HttpPaymentGateway::new(gateway_config));

    let validator_config = JwtValidatorConfig::new(&config.auth.issuer_url, &config.auth.audience)
        .with_cache_duration(config.auth.jwks_cache_ttl());
    let validator: AuthState = Arc::new(JwtSessionValidator::new(validator_config)?);

    // Readers shared across contexts.
    let users: Arc<dyn UserReader> = Arc::new(PostgresUserReader::new(pool.clone()));
    let payment_reader: Arc<dyn PaymentReader> = Arc::new(PostgresPaymentReader::new(pool.clone()));
    let enrollments: Arc<dyn EnrollmentRepository> =
        Arc::new(PostgresEnrollmentRepository::new(pool.clone()));

    let flashcards_state = FlashcardsAppState {
        flashcards: Arc::new(PostgresFlashcardRepository::new(pool.clone())),
    };
    let catalog_state = CatalogAppState {
        reader: Arc::new(PostgresCatalogReader::new(pool.clone())),
        repository: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        enrollments: enrollments.clone(),
        users: users.clone(),
        payments: payment_reader.clone(),
    };
    let billing_state = BillingAppState {
        users,
        payment_reader,
        payment_repository: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        enrollments,
        plans: Arc::new(PostgresPlanReader::new(pool.clone())),
        provider,
    };
    let forum_state = ForumAppState {
        forum: Arc::new(PostgresForumRepository::new(pool)),
    };

    let api = Router::new()
        .merge(catalog_router().with_state(catalog_state.clone()))
        .nest("/flashcards", flashcards_router().with_state(flashcards_state))
        .nest(
            "/billing",
            billing_router_with_limits(
                RateLimitState::new(limiter.clone(), "checkout"),
                RateLimitState::new(limiter.clone(), "cancel"),
            )
            .with_state(billing_state.clone()),
        )
        .nest(
            "/admin",
            admin_catalog_router()
                .with_state(catalog_state)
                .merge(admin_billing_router().with_state(billing_state.clone())),
        )
        .nest(
            "/forum",
            forum_router_with_limits(RateLimitState::new(limiter, "forum"))
                .with_state(forum_state),
        )
        .layer(from_fn_with_state(validator, auth_middleware));

    // Gateway deliveries authenticate via HMAC signature, not sessions, so
    // the webhook routes stay outside the session middleware.
    let app = Router::new()
        .nest("/api", api)
        .nest(
            "/api/webhooks",
            webhook_router().with_state(billing_state),
        )
        .route("/health", get(health))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// GET /health - Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Resolve when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
