//! Card gateway charge request/response types.
//!
//! The gateway uses a different body schema per status code, so the
//! response side is modelled as a classification (`GatewayChargeResult`)
//! rather than a single struct.

use serde::{Deserialize, Serialize};

/// Charge request posted to the gateway.
///
/// `card_cvv` carries the first three reversed PIN digits, see
/// [`crate::services::gateway_client::cvv_substitute`]. `Debug` is
/// hand-written so neither the PAN nor the CVV substitute can leak into logs.
#[derive(Clone, Serialize)]
pub struct GatewayChargeRequest {
    pub card_number: String,
    pub amount_in_sdg: i64,
    pub card_cvv: String,
    pub expiration_date: String,
}

impl std::fmt::Debug for GatewayChargeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayChargeRequest")
            .field(
                "card_number",
                &crate::models::purchase::mask_pan(&self.card_number),
            )
            .field("amount_in_sdg", &self.amount_in_sdg)
            .field("card_cvv", &"***")
            .field("expiration_date", &self.expiration_date)
            .finish()
    }
}

/// Gateway success body.
///
/// # JSON Example
///
/// ```json
/// {
///   "card_number": "4032160009749603",
///   "expiration_date": "2406",
///   "amount_in_sdg": 250.0,
///   "amount_USD": 12.5,
///   "country": "United States of America",
///   "currency": "USD",
///   "paymentinfo": { "id": "ch_1Hqci...", "paid": true, "status": "succeeded" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySuccessResponse {
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub amount_in_sdg: Option<f64>,
    #[serde(rename = "amount_USD", default)]
    pub amount_usd: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "paymentinfo")]
    pub payment_info: PaymentInfo,
}

/// Charge details nested in a gateway success body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub captured: bool,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub refunded: bool,
    pub status: String,
}

/// Raw gateway answer as read off the wire.
#[derive(Debug, Clone)]
pub struct RawGatewayResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Classification of a gateway answer.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayChargeResult {
    Success {
        status: String,
        payment_info: PaymentInfo,
    },
    /// HTTP 500: gateway outage, body ignored.
    Unavailable,
    /// HTTP 400 carrying a readable error message.
    StructuredError { message: String },
    /// Body did not match the schema expected for its status code.
    Malformed { message: String },
}
