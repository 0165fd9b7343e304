//! PIN-translation service request/response types.

use serde::{Deserialize, Serialize};

/// Body posted to `/reverse`.
///
/// Holds key material and the PIN block, so `Debug` only prints the masked PAN.
#[derive(Clone, Serialize)]
pub struct ReversePinRequest {
    pub pan: String,
    pub tmk: String,
    pub twk: String,
    pub pinblock: String,
}

impl std::fmt::Debug for ReversePinRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReversePinRequest")
            .field("pan", &crate::models::purchase::mask_pan(&self.pan))
            .finish_non_exhaustive()
    }
}

/// Body returned by `/reverse`: `{"pin": "..."}` on success, `{"message": "..."}` on failure.
#[derive(Deserialize)]
pub struct ReversePinResponse {
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
