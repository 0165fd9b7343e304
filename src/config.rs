//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct,
//! then validates the endpoints and terminal keys before the server starts.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `GATEWAY_CHARGE_URL` (required): charge endpoint of the card payment gateway
/// - `TERMINAL_MASTER_KEY` (required): TMK forwarded to the PIN service
/// - `TERMINAL_WORKING_KEY` (required): TWK forwarded to the PIN service and served by `/workingKey`
/// - `PIN_SERVICE_URL` (optional): PIN-translation base URL, defaults to `http://localhost:8008`
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8090
/// - `HTTP_TIMEOUT_SECS` (optional): outbound request timeout, defaults to 30
/// - `TRAN_CURRENCY` (optional): currency echoed in envelopes, defaults to `USD`
/// - `TRAN_FEE` (optional): fee echoed in envelopes, defaults to 1.5
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_pin_service_url")]
    pub pin_service_url: String,

    pub gateway_charge_url: String,

    pub terminal_master_key: String,

    pub terminal_working_key: String,

    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_currency")]
    pub tran_currency: String,

    #[serde(default = "default_fee")]
    pub tran_fee: f32,
}

fn default_port() -> u16 {
    8090
}

fn default_pin_service_url() -> String {
    "http://localhost:8008".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_fee() -> f32 {
    1.5
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("HTTP_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

// Keys are secrets; keep them out of `{:?}` output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("pin_service_url", &self.pin_service_url)
            .field("gateway_charge_url", &self.gateway_charge_url)
            .field("terminal_master_key", &"<redacted>")
            .field("terminal_working_key", &"<redacted>")
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("tran_currency", &self.tran_currency)
            .field("tran_fee", &self.tran_fee)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., GATEWAY_CHARGE_URL)
    /// - Environment variable values cannot be parsed into expected types
    /// - A URL is malformed or a terminal key is blank
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from explicit key/value pairs (same names as the environment).
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(pairs)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_url("PIN_SERVICE_URL", &self.pin_service_url)?;
        validate_url("GATEWAY_CHARGE_URL", &self.gateway_charge_url)?;

        if self.terminal_master_key.trim().is_empty() {
            return Err(ConfigError::Empty("TERMINAL_MASTER_KEY"));
        }
        if self.terminal_working_key.trim().is_empty() {
            return Err(ConfigError::Empty("TERMINAL_WORKING_KEY"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Full URL of the PIN-translation `/reverse` endpoint.
    pub fn pin_reverse_url(&self) -> String {
        format!("{}/reverse", self.pin_service_url.trim_end_matches('/'))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            name,
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars = std::collections::BTreeMap::from([
            ("GATEWAY_CHARGE_URL", "https://gateway.test/charge/"),
            ("TERMINAL_MASTER_KEY", "E6FBFD2C914A155D"),
            ("TERMINAL_WORKING_KEY", "2277898cef81413e"),
        ]);
        // later entries override the base set
        vars.extend(extra.iter().copied());
        vars.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_applied() {
        let config = Config::from_pairs(pairs(&[])).unwrap();
        assert_eq!(config.server_port, 8090);
        assert_eq!(config.pin_reverse_url(), "http://localhost:8008/reverse");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.tran_currency, "USD");
        assert_eq!(config.tran_fee, 1.5);
    }

    #[test]
    fn trailing_slash_on_pin_service_is_ignored() {
        let config =
            Config::from_pairs(pairs(&[("PIN_SERVICE_URL", "http://pin.local:9000/")])).unwrap();
        assert_eq!(config.pin_reverse_url(), "http://pin.local:9000/reverse");
    }

    #[test]
    fn missing_gateway_url_is_rejected() {
        let result = Config::from_pairs(vec![
            ("TERMINAL_MASTER_KEY".to_string(), "k".to_string()),
            ("TERMINAL_WORKING_KEY".to_string(), "k".to_string()),
        ]);
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let result = Config::from_pairs(pairs(&[("PIN_SERVICE_URL", "ftp://pin.local")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl {
                name: "PIN_SERVICE_URL",
                ..
            })
        ));
    }

    #[test]
    fn blank_key_is_rejected() {
        let result = Config::from_pairs(pairs(&[("TERMINAL_MASTER_KEY", "  ")]));
        assert!(matches!(
            result,
            Err(ConfigError::Empty("TERMINAL_MASTER_KEY"))
        ));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = Config::from_pairs(pairs(&[])).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("E6FBFD2C914A155D"));
        assert!(!debug.contains("2277898cef81413e"));
    }
}
