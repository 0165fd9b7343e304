//! Client for the remote card payment gateway.
//!
//! Builds the charge payload and posts it. The raw status and body are handed
//! back untouched; classifying them is the normalizer's job.

use crate::{
    error::PurchaseError,
    models::{
        gateway::{GatewayChargeRequest, RawGatewayResponse},
        purchase::PurchaseRequest,
    },
};

const CVV_SUBSTITUTE_LEN: usize = 3;

/// First three digits of the reversed PIN, sent in the gateway's `card_cvv` field.
///
/// This is not a card CVV. The gateway integration was agreed to carry PIN
/// digits in that field, and this function is the single place that does it.
///
/// # Errors
///
/// `MalformedResponse` when the PIN is shorter than three characters or is not all digits.
pub fn cvv_substitute(clear_pin: &str) -> Result<String, PurchaseError> {
    if clear_pin.len() < CVV_SUBSTITUTE_LEN || !clear_pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PurchaseError::MalformedResponse(
            "invalid PIN returned by PIN service".to_string(),
        ));
    }
    Ok(clear_pin[..CVV_SUBSTITUTE_LEN].to_string())
}

impl GatewayChargeRequest {
    /// Charge payload for a purchase and its reversed PIN.
    pub fn from_purchase(request: &PurchaseRequest, clear_pin: &str) -> Result<Self, PurchaseError> {
        Ok(Self {
            card_number: request.pan.clone(),
            amount_in_sdg: request.amount_whole_units(),
            card_cvv: cvv_substitute(clear_pin)?,
            expiration_date: request.exp_date.clone(),
        })
    }
}

#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    charge_url: String,
}

impl GatewayClient {
    pub fn new(client: reqwest::Client, charge_url: String) -> Self {
        Self { client, charge_url }
    }

    /// POST a charge and return the raw answer.
    ///
    /// # Errors
    ///
    /// `Transport` on connection failure or when the body cannot be read.
    /// Non-2xx statuses are not errors here.
    pub async fn charge(
        &self,
        charge: &GatewayChargeRequest,
    ) -> Result<RawGatewayResponse, PurchaseError> {
        tracing::info!(
            amount = charge.amount_in_sdg,
            "Sending charge to gateway: {:?}",
            charge
        );

        let response = self
            .client
            .post(&self.charge_url)
            .json(charge)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gateway request failed: {}", e);
                PurchaseError::Transport(format!("Gateway request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read gateway response: {}", e);
            PurchaseError::Transport(format!("Failed to read gateway response: {}", e))
        })?;

        tracing::info!(status, "Gateway responded");

        Ok(RawGatewayResponse {
            status,
            body: body.to_vec(),
        })
    }
}
