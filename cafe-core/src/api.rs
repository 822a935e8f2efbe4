//! JSON contract with the cafe backend and the transport seam used to reach it.
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cart::OrderLine;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Unreachable(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Sends JSON to the backend and hands back the decoded JSON body.
///
/// Implementations must return the body for non-2xx statuses too: the backend
/// reports declines as `{"success": false}` with 400/401/409.
#[async_trait(?Send)]
pub trait ApiTransport {
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached or replies with a
    /// body that is not JSON.
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError>;

    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached or replies with a
    /// body that is not JSON.
    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveOrderRequest<'a> {
    pub username: &'a str,
    pub items: Vec<OrderLine<'a>>,
    pub total: u64,
}

/// Common reply envelope. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

impl ApiReply {
    /// Backend message, or `fallback` when the backend sent none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// One stored order row returned by order history.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub item_name: String,
    #[serde(deserialize_with = "amount")]
    pub price: f64,
    #[serde(deserialize_with = "amount")]
    pub total: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// DECIMAL columns come back as strings ("100.00") or numbers depending on the
// backend's JSON encoder.
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_defaults_missing_fields() {
        let reply: ApiReply = serde_json::from_value(json!({})).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message_or("fallback"), "fallback");

        let reply: ApiReply =
            serde_json::from_value(json!({"success": false, "message": "  "})).unwrap();
        assert_eq!(reply.message_or("fallback"), "fallback");
    }

    #[test]
    fn order_request_matches_wire_shape() {
        let mut cart = crate::cart::Cart::new();
        cart.add("Coffee", 100);
        cart.add("Sandwich", 150);
        let body = serde_json::to_value(SaveOrderRequest {
            username: "asha",
            items: cart.order_lines(),
            total: 250,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "username": "asha",
                "items": [{"name": "Coffee", "price": 100}, {"name": "Sandwich", "price": 150}],
                "total": 250
            })
        );
    }

    #[test]
    fn order_records_accept_decimal_strings() {
        let reply: ApiReply = serde_json::from_value(json!({
            "success": true,
            "orders": [
                {"id": 7, "username": "asha", "item_name": "Coffee", "price": "100.00", "total": "250.00", "created_at": "2024-05-01 10:00:00"},
                {"item_name": "Tea", "price": 60, "total": 60}
            ]
        }))
        .unwrap();
        assert_eq!(reply.orders.len(), 2);
        assert!((reply.orders[0].total - 250.0).abs() < f64::EPSILON);
        assert!((reply.orders[1].price - 60.0).abs() < f64::EPSILON);
        assert_eq!(reply.orders[1].id, None);
    }
}
