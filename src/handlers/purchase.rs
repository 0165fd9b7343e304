//! Card purchase HTTP handler.
//!
//! - POST /purchase - reverse the PIN, charge the card, answer with an envelope

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};

use crate::{app::AppState, error::PurchaseFailure, models::envelope::EbsResponse};

/// Run a card purchase.
///
/// # Request Body
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
/// # Response
///
/// - **200**: `{"ebs_response": {...}}` with `responseCode` 0
/// - **502**: `{"message": "EBS Error", "code": 600, "details": {...}}`
/// - **504**: same failure body, gateway reported itself down
///
/// The body is taken raw so that unreadable or malformed input still gets
/// the standard failure envelope instead of axum's rejection text.
pub async fn purchase(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<EbsResponse>, PurchaseFailure> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Failed to read purchase body: {}", rejection);
            return Err(state.purchases.reject_input(rejection.body_text()));
        }
    };

    let response = state.purchases.purchase(&body).await?;
    Ok(Json(response))
}
