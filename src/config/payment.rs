//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API key
    pub gateway_api_key: String,

    /// Gateway webhook signing secret
    pub gateway_webhook_secret: String,

    /// Gateway API base URL override (sandbox environments)
    pub gateway_base_url: Option<String>,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gateway_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_API_KEY"));
        }
        if self.gateway_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_WEBHOOK_SECRET"));
        }
        Ok(())
    }
}
