//! `GET|POST /workingKey`: hands the configured terminal working key to terminals.

use axum::{Json, extract::State};

use crate::{
    app::AppState,
    models::envelope::{EbsResponse, ResponseEnvelope},
};

/// # Response (200)
///
/// ```json
/// {
///   "ebs_response": {
///     "responseStatus": "Successful",
///     "responseMessage": "Approval",
///     "responseCode": 0,
///     "workingKey": "2277898cef81413e"
///   }
/// }
/// ```
pub async fn working_key(State(state): State<AppState>) -> Json<EbsResponse> {
    Json(EbsResponse {
        ebs_response: ResponseEnvelope::working_key(&state.terminal_working_key),
    })
}
