//! Configuration management for the bulk SMS sender.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file is honored if present (via `dotenvy`, which does
//! not print to stdout). All configuration problems are fatal at startup,
//! before any roster is resolved or any request is sent.

use crate::client::ApiVariant;
use crate::domain::PhoneFormat;
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default Pushbullet API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pushbullet.com";

/// Configuration for the bulk SMS sender.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pushbullet API base URL
    pub api_url: String,

    /// Access token for authentication.
    /// Available under https://www.pushbullet.com/#settings > Account.
    pub api_key: String,

    /// `iden` of the mobile device that relays the SMS messages
    pub device_iden: String,

    /// Which of the vendor's wire protocols to speak
    pub api_variant: ApiVariant,

    /// Phone-number format the roster is validated against
    pub phone_format: PhoneFormat,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `PUSHBULLET_API_KEY`: access token for authentication
    /// - `PUSHBULLET_DEVICE_ID`: `iden` of the SMS-relaying device
    ///
    /// Optional environment variables:
    /// - `PUSHBULLET_API_URL`: API base URL (default: the public endpoint)
    /// - `PUSHBULLET_API_VARIANT`: `create-text`, `texts-v2`, or `web-client`
    ///   (default: `create-text`)
    /// - `PUSHBULLET_PHONE_FORMAT`: `ten-digit` or `e164` (default: the
    ///   variant's native format)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let api_key = env::var("PUSHBULLET_API_KEY")
            .map_err(|_| ConfigError::MissingVar("PUSHBULLET_API_KEY".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "PUSHBULLET_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let device_iden = env::var("PUSHBULLET_DEVICE_ID")
            .map_err(|_| ConfigError::MissingVar("PUSHBULLET_DEVICE_ID".to_string()))?;

        if device_iden.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "PUSHBULLET_DEVICE_ID".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let api_url =
            env::var("PUSHBULLET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        // Validate API URL format
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "PUSHBULLET_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_variant = match env::var("PUSHBULLET_API_VARIANT") {
            Ok(val) => val
                .parse::<ApiVariant>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "PUSHBULLET_API_VARIANT".to_string(),
                    reason,
                })?,
            Err(_) => ApiVariant::default(),
        };

        // Each wire variant has a native number format; an explicit setting
        // overrides it.
        let phone_format = match env::var("PUSHBULLET_PHONE_FORMAT") {
            Ok(val) => val
                .parse::<PhoneFormat>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "PUSHBULLET_PHONE_FORMAT".to_string(),
                    reason,
                })?,
            Err(_) => api_variant.native_phone_format(),
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        Ok(Config {
            api_url,
            api_key,
            device_iden,
            api_variant,
            phone_format,
            request_timeout,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            device_iden: String::new(),
            api_variant: ApiVariant::CreateText,
            phone_format: PhoneFormat::TenDigit,
            request_timeout: 10,
        }
    }
}
