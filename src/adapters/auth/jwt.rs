//! OIDC adapter for JWT session validation.
//!
//! This adapter implements the `SessionValidator` port against an OIDC
//! identity provider. It validates JWTs by:
//!
//! 1. Fetching JWKS from the provider's well-known endpoint
//! 2. Validating JWT signature against the public keys
//! 3. Validating issuer, audience, and expiry claims
//! 4. Mapping claims to the domain `AuthenticatedUser` type
//!
//! # Security
//!
//! - **Issuer (iss)**: Must match the configured provider URL
//! - **Audience (aud)**: Must contain our application identifier
//! - **Expiry (exp)**: Must be in the future

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Configuration for the OIDC session validator.
#[derive(Debug, Clone)]
pub struct JwtValidatorConfig {
    /// The issuer URL (e.g., "https://auth.example.com").
    /// Used for JWKS discovery and JWT issuer validation.
    pub issuer_url: String,

    /// Expected audience claim in JWTs.
    /// Tokens must contain this audience to be accepted.
    pub audience: String,

    /// How long to cache JWKS before refetching. Defaults to 1 hour.
    pub jwks_cache_duration: Option<Duration>,
}

impl JwtValidatorConfig {
    /// Create a new configuration with required fields.
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_duration: None,
        }
    }

    /// Set a custom JWKS cache duration.
    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }

    /// Get the JWKS URL for this issuer.
    fn jwks_url(&self) -> String {
        format!(
            "{}/.well-known/jwks.json",
            self.issuer_url.trim_end_matches('/')
        )
    }
}

/// JWT claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject - the user ID (UUID).
    sub: String,

    /// Issuer URL.
    iss: String,

    /// Audience - array or single string.
    #[serde(default)]
    aud: Audience,

    /// Expiry timestamp (Unix epoch seconds).
    exp: i64,

    /// User's email address.
    #[serde(default)]
    email: Option<String>,

    /// Platform role ("student" or "admin").
    #[serde(default)]
    role: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

/// OIDC session validator.
///
/// Validates JWTs against the provider's JWKS and extracts user identity.
/// This is the production implementation of `SessionValidator`.
pub struct JwtSessionValidator {
    config: JwtValidatorConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl JwtSessionValidator {
    /// Create a new validator.
    ///
    /// This does NOT fetch JWKS immediately - keys are fetched lazily on first
    /// validation to avoid blocking during startup.
    pub fn new(config: JwtValidatorConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AuthError::ServiceUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Fetch JWKS from the identity provider.
    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();

        tracing::debug!("Fetching JWKS from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("JWKS endpoint returned {}", status);
            return Err(AuthError::ServiceUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse JWKS: {}", e))
        })?;

        tracing::debug!("Fetched {} keys from JWKS", jwks.keys.len());

        Ok(jwks)
    }

    /// Get JWKS, using cache if available and not expired.
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        // Cache miss or expired - fetch new JWKS
        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self
                .config
                .jwks_cache_duration
                .unwrap_or(Duration::from_secs(3600));
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    /// Find the decoding key for a JWT.
    fn find_decoding_key(
        &self,
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!("No matching key found for kid: {}", kid);
            AuthError::InvalidToken
        })?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!("Unsupported algorithm: {:?}", other);
                return Err(AuthError::InvalidToken);
            }
            // Default to RS256 if not specified (common for OIDC)
            None => Algorithm::RS256,
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!("Failed to create decoding key: {}", e);
            AuthError::InvalidToken
        })?;

        Ok((decoding_key, algorithm))
    }

    /// Validate a JWT and extract claims.
    fn validate_token(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<SessionClaims>, AuthError> {
        let mut validation = Validation::new(algorithm);

        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<SessionClaims>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }

    /// Map the role claim to a platform role.
    ///
    /// Unknown or missing roles default to Student, never Admin.
    fn parse_role(role: Option<&str>) -> UserRole {
        match role {
            Some(r) if r.eq_ignore_ascii_case("admin") => UserRole::Admin,
            _ => UserRole::Student,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        // Decode header to get key ID
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks().await?;

        let (decoding_key, algorithm) = self.find_decoding_key(&header, &jwks)?;

        let token_data = self.validate_token(token, &decoding_key, algorithm)?;
        let claims = token_data.claims;

        // Double-check issuer after library validation
        if claims.iss != self.config.issuer_url {
            tracing::warn!(
                "Issuer mismatch after validation: expected '{}', got '{}'",
                self.config.issuer_url,
                claims.iss
            );
            return Err(AuthError::InvalidToken);
        }

        // Double-check audience after library validation
        if !claims.aud.contains(&self.config.audience) {
            tracing::warn!(
                "Audience mismatch after validation: expected '{}', got '{:?}'",
                self.config.audience,
                claims.aud
            );
            return Err(AuthError::InvalidToken);
        }

        let email = claims.email.ok_or_else(|| {
            tracing::warn!("Token missing email claim");
            AuthError::InvalidToken
        })?;

        let user_uuid = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser {
            id: UserId::from_uuid(user_uuid),
            email,
            role: Self::parse_role(claims.role.as_deref()),
        })
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
