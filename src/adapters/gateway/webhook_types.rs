//! Gateway-specific types for webhook handling.
//!
//! These types represent payment gateway objects as they arrive in webhook
//! payloads, before conversion into the port's `WebhookEvent`.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the X-Gateway-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    MissingHeader,
    /// Missing timestamp component (t=...).
    MissingTimestamp,
    /// Missing v1 signature component.
    MissingV1Signature,
    /// Invalid timestamp format.
    InvalidTimestamp,
    /// Invalid signature format (not valid hex).
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "Missing signature header"),
            Self::MissingTimestamp => write!(f, "Missing timestamp (t=) in signature"),
            Self::MissingV1Signature => write!(f, "Missing v1 signature in header"),
            Self::InvalidTimestamp => write!(f, "Invalid timestamp format"),
            Self::InvalidSignatureFormat => write!(f, "Invalid signature format (not valid hex)"),
        }
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed X-Gateway-Signature header components.
///
/// The header format is: `t=timestamp,v1=signature`
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Unix timestamp when the gateway generated the event.
    pub timestamp: i64,

    /// HMAC-SHA256 signature, hex-decoded.
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a signature header into components.
    ///
    /// # Format
    ///
    /// ```text
    /// t=<timestamp>,v1=<signature>
    /// ```
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::MissingTimestamp)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex_decode(value.trim())
                            .ok_or(SignatureParseError::InvalidSignatureFormat)?,
                    );
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or(SignatureParseError::MissingTimestamp)?,
            v1_signature: v1_signature.ok_or(SignatureParseError::MissingV1Signature)?,
        })
    }
}

/// Decode a hex string to bytes.
pub(super) fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Gateway Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw gateway webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "payment.updated").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected payment.
    pub data: GatewayEventData,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayEventData {
    /// The payment affected by this event.
    pub object: serde_json::Value,
}

/// Gateway payment object carried in payment events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayPayment {
    /// Gateway's payment reference (pay_...).
    pub id: String,

    /// Gateway status string, casing varies ("approved", "AUTHORIZED").
    pub status: String,

    /// Charged amount in cents.
    #[serde(default)]
    pub amount_cents: i64,

    /// Platform metadata attached at checkout time.
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,
}

/// Gateway checkout session as returned by the sessions endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted checkout URL the browser is redirected to.
    pub url: String,

    /// Unix timestamp when the session expires.
    pub expires_at: u64,
}

/// Gateway subscription object returned by mutation endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySubscriptionObject {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Subscription status string.
    pub status: String,

    /// Whether the subscription ends at the current period boundary.
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Signature Header Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_valid_header() {
        let header = SignatureHeader::parse("t=1704067200,v1=deadbeef").unwrap();
        assert_eq!(header.timestamp, 1704067200);
        assert_eq!(header.v1_signature, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let header = SignatureHeader::parse("t=1704067200, v1=00ff").unwrap();
        assert_eq!(header.v1_signature, vec![0x00, 0xff]);
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let header = SignatureHeader::parse("t=1704067200,v1=ab,v2=future").unwrap();
        assert_eq!(header.timestamp, 1704067200);
    }

    #[test]
    fn parse_rejects_empty_header() {
        let result = SignatureHeader::parse("");
        assert!(matches!(result, Err(SignatureParseError::MissingHeader)));
    }

    #[test]
    fn parse_rejects_missing_timestamp() {
        let result = SignatureHeader::parse("v1=deadbeef");
        assert!(matches!(result, Err(SignatureParseError::MissingTimestamp)));
    }

    #[test]
    fn parse_rejects_missing_v1() {
        let result = SignatureHeader::parse("t=1704067200");
        assert!(matches!(
            result,
            Err(SignatureParseError::MissingV1Signature)
        ));
    }

    #[test]
    fn parse_rejects_bad_timestamp() {
        let result = SignatureHeader::parse("t=notanumber,v1=deadbeef");
        assert!(matches!(result, Err(SignatureParseError::InvalidTimestamp)));
    }

    #[test]
    fn parse_rejects_bad_hex() {
        let result = SignatureHeader::parse("t=1704067200,v1=xyz");
        assert!(matches!(
            result,
            Err(SignatureParseError::InvalidSignatureFormat)
        ));
    }

    #[test]
    fn parse_rejects_odd_length_hex() {
        let result = SignatureHeader::parse("t=1704067200,v1=abc");
        assert!(matches!(
            result,
            Err(SignatureParseError::InvalidSignatureFormat)
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Hex Helpers
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0x00, 0x01, 0xfe, 0xff];
        assert_eq!(hex_decode(&hex_encode(&bytes)), Some(bytes));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Event Deserialization
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn deserialize_payment_event() {
        let payload = r#"{
            "id": "evt_1",
            "type": "payment.updated",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "pay_1",
                    "status": "approved",
                    "amount_cents": 2990,
                    "metadata": {"user_id": "u1", "plan_id": "p1"}
                }
            }
        }"#;

        let event: GatewayWebhookEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "payment.updated");

        let payment: GatewayPayment = serde_json::from_value(event.data.object).unwrap();
        assert_eq!(payment.id, "pay_1");
        assert_eq!(payment.amount_cents, 2990);
        assert_eq!(payment.metadata.get("user_id"), Some(&"u1".to_string()));
    }

    #[test]
    fn deserialize_payment_defaults_optional_fields() {
        let payment: GatewayPayment =
            serde_json::from_str(r#"{"id": "pay_2", "status": "pending"}"#).unwrap();
        assert_eq!(payment.amount_cents, 0);
        assert!(payment.metadata.is_empty());
    }
}
