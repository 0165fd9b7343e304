//! HTTP request handlers (route handlers).
//!
//! Handlers stay thin: they extract the request, hand it to the purchase
//! service and turn the outcome into a response.

/// Liveness probe
pub mod health;
/// Card purchase endpoint
pub mod purchase;
/// Static working key endpoint
pub mod working_key;
