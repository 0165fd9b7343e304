//! Purchase request received from upstream callers.
//!
//! This module defines:
//! - `PurchaseRequest`: the inbound JSON body of `POST /purchase`
//! - `mask_pan`: the only way a PAN is allowed to leave the service
//! - `parse_error_message`: caller-safe description of a rejected body

use serde::Deserialize;
use serde_json::error::Category;

/// Card purchase request as sent by the upstream switch.
///
/// # JSON Example
///
/// ```json
/// {
///   "terminalId": "18000377",
///   "clientId": "ACTS",
///   "PAN": "9222081700176714465",
///   "pin": "d122f06d07b3ef95",
///   "expDate": "2406",
///   "tranAmount": 250.0,
///   "tranDateTime": "201120112233"
/// }
/// ```
///
/// No validation beyond presence and parseability is applied here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseRequest {
    #[serde(rename = "terminalId", default)]
    pub terminal_id: String,

    #[serde(rename = "clientId", default)]
    pub client_id: String,

    /// Primary account number, 13 to 19 digits. Never logged or echoed in full.
    #[serde(rename = "PAN")]
    pub pan: String,

    /// Encrypted PIN block (hex). Never logged.
    #[serde(rename = "pin")]
    pub pin_block: String,

    /// Card expiry, `YYMM`
    #[serde(rename = "expDate")]
    pub exp_date: String,

    #[serde(rename = "tranAmount")]
    pub tran_amount: f64,

    #[serde(rename = "tranDateTime", default)]
    pub tran_date_time: String,
}

impl PurchaseRequest {
    /// Amount forwarded to the gateway: whole units, truncated toward zero.
    pub fn amount_whole_units(&self) -> i64 {
        self.tran_amount.trunc() as i64
    }

    pub fn masked_pan(&self) -> Option<String> {
        mask_pan(&self.pan)
    }
}

/// Last four characters of a PAN.
///
/// Returns `None` when the PAN is too short for the last four to differ from
/// the whole value, so a full PAN can never be echoed.
pub fn mask_pan(pan: &str) -> Option<String> {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() <= 4 {
        return None;
    }
    Some(chars[chars.len() - 4..].iter().collect())
}

/// Describe a body parse failure without quoting any of the body.
///
/// serde_json's own messages embed the offending value (`invalid type:
/// integer `9222...``), which may be a PAN. Only the position, and the
/// name of a missing field, are kept.
pub fn parse_error_message(err: &serde_json::Error) -> String {
    let position = format!("line {} column {}", err.line(), err.column());
    match err.classify() {
        Category::Io => "failed to read purchase request".to_string(),
        Category::Eof => format!("unexpected end of purchase request at {}", position),
        Category::Syntax => format!("malformed purchase request at {}", position),
        Category::Data => match missing_field(err) {
            Some(field) => format!("missing field `{}` in purchase request", field),
            None => format!("invalid value in purchase request at {}", position),
        },
    }
}

/// Field name from a serde "missing field `x`" error. The name comes from
/// this crate's struct definition, never from the body.
fn missing_field(err: &serde_json::Error) -> Option<String> {
    let text = err.to_string();
    let rest = text.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}
