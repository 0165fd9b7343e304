//! Data models for the inbound purchase contract, the outbound envelope and
//! the two downstream services.

/// Inbound purchase request and PAN masking
pub mod purchase;
/// Outbound response envelope
pub mod envelope;
/// Card gateway charge request/response
pub mod gateway;
/// PIN-translation service request/response
pub mod pin;
