//! Payment gateway service implementation
//!
//! This service handles the external payment gateway integration: order
//! creation over HTTP, timeout handling, and callback signature
//! verification. The gateway signs callbacks with an HMAC-SHA256 of
//! `"{order_id}|{payment_id}"` keyed by the API secret.

use std::time::Duration;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::utils::errors::{PaymentError, PaymentResult, Result};
use crate::utils::helpers;

type HmacSha256 = Hmac<Sha256>;

/// Order created at the gateway, returned to the client for checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// Gateway order-creation response structure
#[derive(Debug, Clone, Deserialize)]
struct GatewayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    receipt: Option<String>,
}

#[derive(Debug, Serialize)]
struct GatewayOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Payment gateway service
#[derive(Clone)]
#[derive(Debug)]
pub struct PaymentGateway {
    client: Client,
    settings: Settings,
}

impl PaymentGateway {
    /// Create a new PaymentGateway instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.payment.timeout_seconds))
            .user_agent("CornerClub-Backend/1.0")
            .build()?;

        Ok(Self { client, settings })
    }

    /// Create a payment order at the gateway.
    ///
    /// The amount is in minor currency units. Timeouts surface as
    /// `PaymentError::Timeout` so the booking workflow never hangs on the
    /// gateway.
    pub async fn create_order(&self, amount: i64) -> PaymentResult<PaymentOrder> {
        let receipt = helpers::generate_receipt();
        let url = format!("{}/v1/orders", self.settings.payment.api_url);

        debug!(amount = amount, receipt = %receipt, "Creating payment order");

        let response = self
            .client
            .post(&url)
            .basic_auth(
                &self.settings.payment.key_id,
                Some(&self.settings.payment.key_secret),
            )
            .json(&GatewayOrderRequest {
                amount,
                currency: &self.settings.payment.currency,
                receipt: &receipt,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::Timeout
                } else if e.is_connect() {
                    PaymentError::ServiceUnavailable
                } else {
                    PaymentError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaymentError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let order: GatewayOrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        if order.amount != amount {
            return Err(PaymentError::InvalidResponse(format!(
                "Gateway returned amount {} for requested {}",
                order.amount, amount
            )));
        }

        info!(order_id = %order.id, amount = amount, "Payment order created");

        Ok(PaymentOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt.unwrap_or(receipt),
        })
    }

    /// Verify a payment callback signature.
    ///
    /// Invalid verification is fatal for the booking attempt; the caller may
    /// retry only with a fresh order.
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> PaymentResult<()> {
        let expected = self.sign(order_id, payment_id);

        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            debug!(order_id = order_id, payment_id = payment_id, "Payment signature valid");
            Ok(())
        } else {
            warn!(
                order_id = order_id,
                payment_id = payment_id,
                "Payment signature verification failed"
            );
            Err(PaymentError::InvalidSignature)
        }
    }

    /// Compute the expected callback signature for an order/payment pair
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.settings.payment.key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check if payments are enabled
    pub fn is_enabled(&self) -> bool {
        self.settings.features.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> PaymentGateway {
        let mut settings = Settings::default();
        settings.payment.key_id = "rzp_test_key".to_string();
        settings.payment.key_secret = "rzp_test_secret".to_string();
        PaymentGateway::new(settings).unwrap()
    }

    #[test]
    fn test_signature_round_trip() {
        let gw = gateway();
        let signature = gw.sign("order_123", "pay_456");
        assert!(gw.verify("order_123", "pay_456", &signature).is_ok());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let gw = gateway();
        let signature = gw.sign("order_123", "pay_456");

        assert!(gw.verify("order_999", "pay_456", &signature).is_err());
        assert!(gw.verify("order_123", "pay_999", &signature).is_err());
        assert!(gw.verify("order_123", "pay_456", "deadbeef").is_err());
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let gw = gateway();

        let mut other_settings = Settings::default();
        other_settings.payment.key_id = "rzp_test_key".to_string();
        other_settings.payment.key_secret = "another_secret".to_string();
        let other = PaymentGateway::new(other_settings).unwrap();

        assert_ne!(
            gw.sign("order_123", "pay_456"),
            other.sign("order_123", "pay_456")
        );
    }

    #[test]
    fn test_signature_is_hex_encoded_sha256() {
        let gw = gateway();
        let signature = gw.sign("order_123", "pay_456");
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_gateway_order_response_deserialization() {
        let json = r#"{"id": "order_abc", "amount": 50000, "currency": "INR", "receipt": "rcpt_1"}"#;
        let response: GatewayOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "order_abc");
        assert_eq!(response.amount, 50000);
        assert_eq!(response.receipt.as_deref(), Some("rcpt_1"));

        // Receipt is optional in the gateway response
        let json = r#"{"id": "order_abc", "amount": 50000, "currency": "INR"}"#;
        let response: GatewayOrderResponse = serde_json::from_str(json).unwrap();
        assert!(response.receipt.is_none());
    }
}
