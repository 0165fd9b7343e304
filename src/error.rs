//! Error types and HTTP error response handling.
//!
//! Every failure of a purchase is caught at the orchestrator boundary and
//! rendered as the same error envelope (`responseCode` 600). The HTTP status
//! is the only thing that varies: 504 when the gateway reports itself down,
//! 502 for everything else.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::envelope::{ErrorDetails, ResponseEnvelope};

/// Failure taxonomy of a single purchase.
///
/// The `Display` text of each variant is what ends up in the envelope's
/// `responseMessage`, so it must never contain PIN material or a full PAN.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    /// Inbound body could not be read or parsed as a purchase request.
    #[error("{0}")]
    InputParse(String),

    /// Network, connection or body-read failure talking to a dependency.
    #[error("{0}")]
    Transport(String),

    /// PIN-translation service answered with a non-200 status.
    #[error("{0}")]
    PinReversal(String),

    /// Gateway answered with HTTP 500.
    #[error("gateway unavailable")]
    GatewayUnavailable,

    /// Gateway answered with a well-formed error payload.
    #[error("{0}")]
    Gateway(String),

    /// A dependency answered with a body we could not interpret.
    #[error("{0}")]
    MalformedResponse(String),
}

impl PurchaseError {
    /// HTTP status written for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PurchaseError::GatewayUnavailable => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PurchaseError::InputParse(_) => "input_parse",
            PurchaseError::Transport(_) => "transport",
            PurchaseError::PinReversal(_) => "pin_reversal",
            PurchaseError::GatewayUnavailable => "gateway_unavailable",
            PurchaseError::Gateway(_) => "gateway_error",
            PurchaseError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for PurchaseError {
    fn from(err: reqwest::Error) -> Self {
        PurchaseError::Transport(err.to_string())
    }
}

/// A failed purchase: the error plus the envelope already built for the caller.
#[derive(Debug)]
pub struct PurchaseFailure {
    pub error: PurchaseError,
    pub envelope: ResponseEnvelope,
}

/// Convert a failed purchase into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "message": "EBS Error",
///   "code": 600,
///   "details": { "responseStatus": "Failed", "responseCode": 600, ... }
/// }
/// ```
impl IntoResponse for PurchaseFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = Json(ErrorDetails::new(self.envelope));

        (status, body).into_response()
    }
}
