// SPDX-License-Identifier: MIT

//! Notification configuration read from the environment
//!
//! Only needed when `--notify` is given. It is built once at startup and
//! handed to the notifier, which never reads the environment itself.

use std::env;
use std::fmt;

use crate::error::{ConcheckError, Result};

/// Sender address (required)
pub const SENDER_ENV: &str = "CONCHECK_FROM";
/// Sender display name
pub const SENDER_NAME_ENV: &str = "CONCHECK_FROM_NAME";
/// Resend API key (required)
pub const API_KEY_ENV: &str = "RESEND_API_KEY";
/// Resend API base URL
pub const BASE_URL_ENV: &str = "RESEND_BASE_URL";

pub const DEFAULT_SENDER_NAME: &str = "Concheck Script";
pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Clone)]
pub struct NotifyConfig {
    pub sender: String,
    pub sender_name: String,
    pub api_key: String,
    pub base_url: String,
}

impl NotifyConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sender = get(SENDER_ENV).ok_or_else(|| {
            ConcheckError::config(format!(
                "No sending mail was found, to be notified you must provide one ({})",
                SENDER_ENV
            ))
        })?;
        let api_key = get(API_KEY_ENV).ok_or_else(|| {
            ConcheckError::config(format!(
                "No Resend API key was found, please provide one to be notified ({})",
                API_KEY_ENV
            ))
        })?;

        let sender_name = get(SENDER_NAME_ENV).unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());
        let base_url = get(BASE_URL_ENV)
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            sender,
            sender_name,
            api_key,
            base_url,
        })
    }

    /// The `From` header value, e.g. `Concheck Script <alerts@example.com>`
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender)
    }
}

impl fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("sender", &self.sender)
            .field("sender_name", &self.sender_name)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_complete_config_with_defaults() {
        let config = NotifyConfig::from_lookup(lookup(&[
            (SENDER_ENV, "alerts@example.com"),
            (API_KEY_ENV, "re_123"),
        ]))
        .unwrap();

        assert_eq!(config.sender, "alerts@example.com");
        assert_eq!(config.api_key, "re_123");
        assert_eq!(config.sender_name, DEFAULT_SENDER_NAME);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.from_header(),
            "Concheck Script <alerts@example.com>"
        );
    }

    #[test]
    fn test_overrides() {
        let config = NotifyConfig::from_lookup(lookup(&[
            (SENDER_ENV, "alerts@example.com"),
            (API_KEY_ENV, "re_123"),
            (SENDER_NAME_ENV, "Stock Watch"),
            (BASE_URL_ENV, "http://127.0.0.1:9999/"),
        ]))
        .unwrap();

        assert_eq!(config.sender_name, "Stock Watch");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_missing_sender() {
        let err = NotifyConfig::from_lookup(lookup(&[(API_KEY_ENV, "re_123")])).unwrap_err();
        assert!(matches!(err, ConcheckError::Config(ref m) if m.contains(SENDER_ENV)));
    }

    #[test]
    fn test_missing_api_key() {
        let err =
            NotifyConfig::from_lookup(lookup(&[(SENDER_ENV, "alerts@example.com")])).unwrap_err();
        assert!(matches!(err, ConcheckError::Config(ref m) if m.contains(API_KEY_ENV)));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let err = NotifyConfig::from_lookup(lookup(&[
            (SENDER_ENV, "  "),
            (API_KEY_ENV, "re_123"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConcheckError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = NotifyConfig::from_lookup(lookup(&[
            (SENDER_ENV, "alerts@example.com"),
            (API_KEY_ENV, "re_secret"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("re_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
