//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - Production OIDC JWT validation with JWKS caching
//! - `mock` - Test implementation that doesn't require an identity provider

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, JwtValidatorConfig};
pub use mock::MockSessionValidator;
