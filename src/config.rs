use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub service_url: String,
    pub token: String,
    pub timeout: Duration,
    pub quote_dir: PathBuf,
}

impl Config {
    /// Reads `ORDER_SERVICE_URL`, `ORDER_SERVICE_TOKEN`, `HTTP_TIMEOUT_SECS`
    /// and `QUOTE_DIR` from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let service_url = lookup("ORDER_SERVICE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("ORDER_SERVICE_URL must be set".to_string()))?;
        let token = lookup("ORDER_SERVICE_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or(AppError::MissingCredential)?;
        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("HTTP_TIMEOUT_SECS must be a valid number, got '{}'", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let quote_dir = lookup("QUOTE_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);

        Ok(Config {
            service_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
            quote_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = Config::from_lookup(lookup(&[
            ("ORDER_SERVICE_URL", "http://localhost:3000/api"),
            ("ORDER_SERVICE_TOKEN", "abc"),
        ]))
        .expect("valid config");

        assert_eq!(config.service_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.quote_dir, PathBuf::from("."));
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("ORDER_SERVICE_TOKEN", "abc")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn blank_token_is_a_missing_credential() {
        let err = Config::from_lookup(lookup(&[
            ("ORDER_SERVICE_URL", "http://localhost:3000"),
            ("ORDER_SERVICE_TOKEN", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("ORDER_SERVICE_URL", "http://localhost:3000"),
            ("ORDER_SERVICE_TOKEN", "abc"),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: HTTP_TIMEOUT_SECS must be a valid number, got 'soon'"
        );
    }
}
