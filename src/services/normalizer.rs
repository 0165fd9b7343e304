//! Classification of raw gateway answers.
//!
//! The gateway uses a different schema per status code, so the status is
//! inspected before any attempt to parse the body:
//!
//! 1. `500`: outage, body ignored
//! 2. `400`: flat string map with a `messege` key (sic)
//! 3. anything else: the success schema

use std::collections::HashMap;

use crate::{
    error::PurchaseError,
    models::gateway::{GatewayChargeResult, GatewaySuccessResponse, PaymentInfo},
};

pub const MALFORMED_ERROR_RESPONSE: &str = "malformed error response";
pub const UNPARSEABLE_SUCCESS_RESPONSE: &str = "unparseable success response";

/// Key the gateway uses for its error text. The misspelling is the gateway's.
const ERROR_MESSAGE_KEY: &str = "messege";

/// Classify a gateway answer.
pub fn normalize(body: &[u8], status: u16) -> GatewayChargeResult {
    match status {
        500 => GatewayChargeResult::Unavailable,
        400 => classify_error_body(body),
        _ => match serde_json::from_slice::<GatewaySuccessResponse>(body) {
            Ok(success) => GatewayChargeResult::Success {
                status: success.payment_info.status.clone(),
                payment_info: success.payment_info,
            },
            Err(e) => {
                tracing::warn!(status, "Gateway success body did not parse: {}", e);
                GatewayChargeResult::Malformed {
                    message: UNPARSEABLE_SUCCESS_RESPONSE.to_string(),
                }
            }
        },
    }
}

fn classify_error_body(body: &[u8]) -> GatewayChargeResult {
    let fields = match serde_json::from_slice::<HashMap<String, String>>(body) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("Gateway error body did not parse: {}", e);
            return GatewayChargeResult::Malformed {
                message: MALFORMED_ERROR_RESPONSE.to_string(),
            };
        }
    };

    match fields.get(ERROR_MESSAGE_KEY) {
        Some(raw) => GatewayChargeResult::StructuredError {
            message: parse_gateway_error(raw).to_string(),
        },
        None => GatewayChargeResult::Malformed {
            message: MALFORMED_ERROR_RESPONSE.to_string(),
        },
    }
}

/// Human-readable tail of a gateway error.
///
/// `"Request req_x: insufficient funds"` becomes `"insufficient funds"`.
/// Text without a `": "` separator is returned as-is.
pub fn parse_gateway_error(raw: &str) -> &str {
    match raw.find(": ") {
        Some(idx) => &raw[idx + 2..],
        None => raw,
    }
}

impl GatewayChargeResult {
    /// Collapse the classification into the purchase error taxonomy.
    pub fn into_result(self) -> Result<(String, PaymentInfo), PurchaseError> {
        match self {
            GatewayChargeResult::Success {
                status,
                payment_info,
            } => Ok((status, payment_info)),
            GatewayChargeResult::Unavailable => Err(PurchaseError::GatewayUnavailable),
            GatewayChargeResult::StructuredError { message } => Err(PurchaseError::Gateway(message)),
            GatewayChargeResult::Malformed { message } => {
                Err(PurchaseError::MalformedResponse(message))
            }
        }
    }
}
