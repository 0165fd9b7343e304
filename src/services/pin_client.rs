//! Client for the local PIN-translation service.
//!
//! Sends the PIN block, PAN and terminal keys to `/reverse` and returns the
//! clear PIN. Nothing is cached or retried, and the clear PIN is never logged.

use crate::{
    error::PurchaseError,
    models::pin::{ReversePinRequest, ReversePinResponse},
};

const GENERIC_FAILURE: &str = "PIN reversal failed";

#[derive(Clone)]
pub struct PinReversalClient {
    client: reqwest::Client,
    endpoint: String,
    terminal_master_key: String,
    terminal_working_key: String,
}

impl PinReversalClient {
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client (carries the configured timeout)
    /// * `endpoint` - Full URL of the `/reverse` endpoint
    /// * `terminal_master_key` / `terminal_working_key` - keys the PIN service decrypts with
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        terminal_master_key: String,
        terminal_working_key: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            terminal_master_key,
            terminal_working_key,
        }
    }

    /// Recover the clear PIN from an encrypted PIN block.
    ///
    /// # Errors
    ///
    /// - `PinReversal`: service answered non-200 (its `message`, or a generic text)
    /// - `Transport`: connection failure, timeout, unreadable or malformed body
    pub async fn reverse_pin(&self, pin_block: &str, pan: &str) -> Result<String, PurchaseError> {
        let request = ReversePinRequest {
            pan: pan.to_string(),
            tmk: self.terminal_master_key.clone(),
            twk: self.terminal_working_key.clone(),
            pinblock: pin_block.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("PIN service request failed: {}", e);
                PurchaseError::Transport(format!("PIN service request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read PIN service response: {}", e);
            PurchaseError::Transport(format!("Failed to read PIN service response: {}", e))
        })?;

        tracing::debug!(status = status.as_u16(), "PIN service responded");

        if status != reqwest::StatusCode::OK {
            let message = serde_json::from_slice::<ReversePinResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::warn!(status = status.as_u16(), "PIN reversal rejected: {}", message);
            return Err(PurchaseError::PinReversal(message));
        }

        let parsed: ReversePinResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Malformed PIN service response: {}", e);
            PurchaseError::Transport(format!("Malformed PIN service response: {}", e))
        })?;

        parsed.pin.ok_or_else(|| {
            tracing::error!("PIN service response has no pin field");
            PurchaseError::Transport("PIN service response missing pin".to_string())
        })
    }
}
