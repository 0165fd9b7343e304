//! Fixed response envelope returned for every purchase, success or failure.

use serde::Serialize;

use crate::models::purchase::PurchaseRequest;

pub const RESPONSE_CODE_SUCCESS: i32 = 0;
pub const RESPONSE_CODE_FAILURE: i32 = 600;

pub const STATUS_SUCCESSFUL: &str = "Successful";
pub const STATUS_FAILED: &str = "Failed";

/// Currency and fee echoed in every purchase envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeSettings {
    pub currency: String,
    pub fee: f32,
}

/// Outbound response envelope.
///
/// The `PAN` field only ever holds the last four digits of the card number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "responseStatus", skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,

    #[serde(rename = "responseMessage", skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,

    #[serde(rename = "responseCode")]
    pub response_code: i32,

    #[serde(rename = "terminalId", skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,

    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(rename = "systemTraceAuditNumber", skip_serializing_if = "Option::is_none")]
    pub system_trace_audit_number: Option<u32>,

    #[serde(rename = "tranAmount", skip_serializing_if = "Option::is_none")]
    pub tran_amount: Option<f64>,

    #[serde(rename = "tranDateTime", skip_serializing_if = "Option::is_none")]
    pub tran_date_time: Option<String>,

    #[serde(rename = "PAN", skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,

    #[serde(rename = "tranCurrencyCode", skip_serializing_if = "Option::is_none")]
    pub tran_currency: Option<String>,

    #[serde(rename = "tranFee", skip_serializing_if = "Option::is_none")]
    pub tran_fee: Option<f32>,

    #[serde(rename = "workingKey", skip_serializing_if = "Option::is_none")]
    pub working_key: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl ResponseEnvelope {
    /// Envelope for a purchase outcome, echoing the request's identifying fields.
    pub fn for_purchase(
        request: &PurchaseRequest,
        trace_number: u32,
        settings: &EnvelopeSettings,
        status: &str,
        message: impl Into<String>,
        code: i32,
    ) -> Self {
        Self {
            response_status: Some(status.to_string()),
            response_message: Some(message.into()),
            response_code: code,
            terminal_id: non_empty(&request.terminal_id),
            client_id: non_empty(&request.client_id),
            system_trace_audit_number: Some(trace_number),
            tran_amount: Some(request.tran_amount),
            tran_date_time: non_empty(&request.tran_date_time),
            pan: request.masked_pan(),
            tran_currency: Some(settings.currency.clone()),
            tran_fee: Some(settings.fee),
            working_key: None,
        }
    }

    /// Failure envelope for a body that never parsed into a request.
    ///
    /// Only service-side fields are set; nothing the caller sent is echoed.
    pub fn for_rejected_input(
        trace_number: u32,
        settings: &EnvelopeSettings,
        message: impl Into<String>,
    ) -> Self {
        Self {
            response_status: Some(STATUS_FAILED.to_string()),
            response_message: Some(message.into()),
            response_code: RESPONSE_CODE_FAILURE,
            system_trace_audit_number: Some(trace_number),
            tran_currency: Some(settings.currency.clone()),
            tran_fee: Some(settings.fee),
            ..Default::default()
        }
    }

    /// Static approval carrying the terminal working key.
    pub fn working_key(key: &str) -> Self {
        Self {
            response_status: Some(STATUS_SUCCESSFUL.to_string()),
            response_message: Some("Approval".to_string()),
            response_code: RESPONSE_CODE_SUCCESS,
            working_key: Some(key.to_string()),
            ..Default::default()
        }
    }
}

/// Success wrapper: `{"ebs_response": {...}}`.
#[derive(Debug, Serialize)]
pub struct EbsResponse {
    pub ebs_response: ResponseEnvelope,
}

/// Failure wrapper: `{"message": "EBS Error", "code": 600, "details": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub code: i32,
    pub details: ResponseEnvelope,
}

impl ErrorDetails {
    pub fn new(details: ResponseEnvelope) -> Self {
        Self {
            message: "EBS Error".to_string(),
            code: RESPONSE_CODE_FAILURE,
            details,
        }
    }
}
