//! Purchase orchestration.
//!
//! Sequences one purchase end to end:
//!
//! 1. Parse the inbound body
//! 2. Reverse the PIN block via the PIN service
//! 3. Build and send the gateway charge
//! 4. Classify the gateway answer
//!
//! The first failure short-circuits the rest. Every outcome, success or
//! failure, produces exactly one envelope. Nothing is retried.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{PurchaseError, PurchaseFailure},
    models::{
        envelope::{
            EbsResponse, EnvelopeSettings, RESPONSE_CODE_FAILURE, RESPONSE_CODE_SUCCESS,
            ResponseEnvelope, STATUS_FAILED, STATUS_SUCCESSFUL,
        },
        gateway::GatewayChargeRequest,
        purchase::{PurchaseRequest, parse_error_message},
    },
    services::{
        gateway_client::GatewayClient, normalizer, pin_client::PinReversalClient,
        trace::TraceNumberSource,
    },
};

#[derive(Clone)]
pub struct PurchaseService {
    pin_client: PinReversalClient,
    gateway_client: GatewayClient,
    trace_numbers: Arc<dyn TraceNumberSource>,
    envelope_settings: EnvelopeSettings,
}

impl PurchaseService {
    pub fn new(
        pin_client: PinReversalClient,
        gateway_client: GatewayClient,
        trace_numbers: Arc<dyn TraceNumberSource>,
        envelope_settings: EnvelopeSettings,
    ) -> Self {
        Self {
            pin_client,
            gateway_client,
            trace_numbers,
            envelope_settings,
        }
    }

    /// Wire both outbound clients from configuration.
    ///
    /// A single HTTP client with the configured timeout is shared by both legs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn from_config(
        config: &Config,
        trace_numbers: Arc<dyn TraceNumberSource>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self::new(
            PinReversalClient::new(
                client.clone(),
                config.pin_reverse_url(),
                config.terminal_master_key.clone(),
                config.terminal_working_key.clone(),
            ),
            GatewayClient::new(client, config.gateway_charge_url.clone()),
            trace_numbers,
            EnvelopeSettings {
                currency: config.tran_currency.clone(),
                fee: config.tran_fee,
            },
        ))
    }

    /// Handle one raw purchase body.
    pub async fn purchase(&self, body: &[u8]) -> Result<EbsResponse, PurchaseFailure> {
        let request: PurchaseRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                let message = parse_error_message(&e);
                tracing::warn!("Error parsing purchase request: {}", message);
                return Err(self.reject_input(message));
            }
        };

        let span = tracing::info_span!(
            "purchase",
            request_id = %Uuid::new_v4(),
            terminal_id = %request.terminal_id,
            pan = request.masked_pan().as_deref().unwrap_or("-"),
        );

        async {
            match self.execute(&request).await {
                Ok(status) => {
                    tracing::info!("Purchase approved: {}", status);
                    Ok(EbsResponse {
                        ebs_response: self.envelope(
                            &request,
                            STATUS_SUCCESSFUL,
                            status,
                            RESPONSE_CODE_SUCCESS,
                        ),
                    })
                }
                Err(error) => {
                    tracing::warn!(
                        kind = error.kind(),
                        http_status = error.status_code().as_u16(),
                        "Purchase failed: {}",
                        error
                    );
                    Err(self.failure(&request, error))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Failure for a body that could not be read or parsed.
    pub fn reject_input(&self, message: impl Into<String>) -> PurchaseFailure {
        let error = PurchaseError::InputParse(message.into());
        let envelope = ResponseEnvelope::for_rejected_input(
            self.trace_numbers.next_trace_number(),
            &self.envelope_settings,
            error.to_string(),
        );
        PurchaseFailure { error, envelope }
    }

    /// Steps 2 to 4. Returns the gateway's payment status on success.
    async fn execute(&self, request: &PurchaseRequest) -> Result<String, PurchaseError> {
        let clear_pin = self
            .pin_client
            .reverse_pin(&request.pin_block, &request.pan)
            .await?;

        let charge = GatewayChargeRequest::from_purchase(request, &clear_pin)?;

        let raw = self.gateway_client.charge(&charge).await?;

        let (status, payment_info) = normalizer::normalize(&raw.body, raw.status).into_result()?;
        tracing::debug!(charge_id = %payment_info.id, paid = payment_info.paid, "Gateway charge accepted");

        Ok(status)
    }

    fn envelope(
        &self,
        request: &PurchaseRequest,
        status: &str,
        message: impl Into<String>,
        code: i32,
    ) -> ResponseEnvelope {
        ResponseEnvelope::for_purchase(
            request,
            self.trace_numbers.next_trace_number(),
            &self.envelope_settings,
            status,
            message,
            code,
        )
    }

    fn failure(&self, request: &PurchaseRequest, error: PurchaseError) -> PurchaseFailure {
        let envelope = self.envelope(
            request,
            STATUS_FAILED,
            error.to_string(),
            RESPONSE_CODE_FAILURE,
        );
        PurchaseFailure { error, envelope }
    }
}
