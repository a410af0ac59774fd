use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Overrides `api_base_url` for the current process.
pub const API_URL_ENV: &str = "MONEY_SAVER_API_URL";
/// Overrides `auth_token` for the current process.
pub const TOKEN_ENV: &str = "MONEY_SAVER_TOKEN";

/// Stores user-configurable preferences for the ledger client and the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub currency: String,
    pub locale: String,
    #[serde(default)]
    pub currency_precision: Option<u8>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            auth_token: None,
            request_timeout_secs: Self::default_request_timeout_secs(),
            currency: "USD".into(),
            locale: "en-US".into(),
            currency_precision: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 7] = [
        "api_base_url",
        "auth_token",
        "request_timeout_secs",
        "currency",
        "locale",
        "currency_precision",
        "ui_color_enabled",
    ];

    pub fn default_api_base_url() -> String {
        "http://localhost:5000/api".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        15
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Display precision for amounts; two decimals unless configured.
    pub fn precision(&self) -> u32 {
        u32::from(self.currency_precision.unwrap_or(2))
    }

    /// Applies `MONEY_SAVER_API_URL` / `MONEY_SAVER_TOKEN` when set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        )
    }

    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|value| !value.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(token) = token.filter(|value| !value.trim().is_empty()) {
            self.auth_token = Some(token.trim().to_string());
        }
        self
    }

    /// Current value of `key` rendered for display. Tokens are masked.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "api_base_url" => self.api_base_url.clone(),
            "auth_token" => match &self.auth_token {
                Some(_) => "********".into(),
                None => "(none)".into(),
            },
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "currency" => self.currency.clone(),
            "locale" => self.locale.clone(),
            "currency_precision" => self.precision().to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` into the field named by `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "api_base_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("expected an http:// or https:// URL"));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "auth_token" => {
                self.auth_token = match value {
                    "" | "none" => None,
                    token => Some(token.to_string()),
                };
            }
            "request_timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| invalid("expected whole seconds"))?;
                if secs == 0 {
                    return Err(invalid("must be at least 1"));
                }
                self.request_timeout_secs = secs;
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter ISO code"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "locale" => {
                if value.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                self.locale = value.to_string();
            }
            "currency_precision" => {
                let digits: u8 = value.parse().map_err(|_| invalid("expected 0-4"))?;
                if digits > 4 {
                    return Err(invalid("expected 0-4"));
                }
                self.currency_precision = Some(digits);
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("expected true or false")),
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
