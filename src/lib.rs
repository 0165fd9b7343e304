//! Card purchase bridge.
//!
//! Accepts card purchases from an upstream switch, recovers the clear PIN
//! through a local PIN-translation service, charges the card on a remote
//! payment gateway and maps the answer back to a fixed response envelope.
//!
//! # Modules
//!
//! - `app`: router and shared state
//! - `config`: environment configuration
//! - `error`: purchase error taxonomy and its HTTP mapping
//! - `handlers`: HTTP route handlers
//! - `models`: request, envelope and dependency payloads
//! - `services`: PIN client, gateway client, normalizer, orchestrator

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
