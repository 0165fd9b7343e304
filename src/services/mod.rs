//! Business logic services.
//!
//! Services hold the purchase pipeline, separated from HTTP handlers:
//! PIN reversal, the gateway charge, response classification and the
//! orchestrator that sequences them.

pub mod gateway_client;
pub mod normalizer;
pub mod pin_client;
pub mod purchase_service;
pub mod trace;
