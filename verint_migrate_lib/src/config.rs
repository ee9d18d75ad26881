//! Environment-driven configuration.

use std::fmt;
use std::time::Duration;

use verint_api::{Client, Signer};

use crate::error::MigrateError;

pub const BASE_URL_VAR: &str = "VERINT_BASE_URL";
pub const API_KEY_ID_VAR: &str = "VERINT_API_KEY_ID";
pub const API_KEY_SECRET_VAR: &str = "VERINT_API_KEY_SECRET";
pub const TIMEOUT_VAR: &str = "VERINT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the Verint API.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key_id: String,
    pub api_key_secret: String,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, MigrateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, reporting every missing
    /// required variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MigrateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(BASE_URL_VAR);
        let api_key_id = get(API_KEY_ID_VAR);
        let api_key_secret = get(API_KEY_SECRET_VAR);

        let missing: Vec<&str> = [
            (BASE_URL_VAR, base_url.is_none()),
            (API_KEY_ID_VAR, api_key_id.is_none()),
            (API_KEY_SECRET_VAR, api_key_secret.is_none()),
        ]
        .into_iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(key, _)| key)
        .collect();
        if !missing.is_empty() {
            return Err(MigrateError::Config(format!(
                "missing environment variable(s): {}",
                missing.join(", ")
            )));
        }

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                MigrateError::Config(format!("{} must be a whole number, got '{}'", TIMEOUT_VAR, raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.unwrap_or_default(),
            api_key_id: api_key_id.unwrap_or_default(),
            api_key_secret: api_key_secret.unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds an authenticated client. Fails before any request if the secret
    /// cannot be decoded.
    pub fn client(&self) -> Result<Client, MigrateError> {
        let signer = Signer::new(&self.api_key_id, &self.api_key_secret)?;
        Ok(Client::with_timeout(&self.base_url, signer, self.timeout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_values() {
        let cfg = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://wfo.example.com"),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "c2VjcmV0"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "https://wfo.example.com");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
    }

    #[test]
    fn timeout_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://wfo.example.com"),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "c2VjcmV0"),
        ]))
        .unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = Config::from_lookup(lookup(&[(API_KEY_ID_VAR, "kid")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(BASE_URL_VAR));
        assert!(msg.contains(API_KEY_SECRET_VAR));
        assert!(!msg.contains(API_KEY_ID_VAR));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "  "),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "c2VjcmV0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, MigrateError::Config(_)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://wfo.example.com"),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "c2VjcmV0"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }

    #[test]
    fn bad_secret_fails_before_any_request() {
        let cfg = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://wfo.example.com"),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "%%%"),
        ]))
        .unwrap();
        let err = cfg.client().err().unwrap();
        assert!(matches!(
            err,
            MigrateError::Api(verint_api::Error::AuthConfiguration(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://wfo.example.com"),
            (API_KEY_ID_VAR, "kid"),
            (API_KEY_SECRET_VAR, "c2VjcmV0"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", cfg).contains("c2VjcmV0"));
    }
}
