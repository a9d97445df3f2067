//! HTTP client for the Pushbullet REST API.
//!
//! This module provides a synchronous HTTP client that can be used from
//! async contexts via `tokio::task::spawn_blocking` (see [`async_wrapper`]).
//! The vendor exposes the same SMS endpoint under three incompatible wire
//! protocols; all three carry an identical JSON body and differ only in
//! endpoint path and header set, so they are one client parameterized by
//! [`ApiVariant`] rather than three near-duplicate code paths.

mod async_wrapper;
pub use async_wrapper::{AsyncPushbulletTransport, SmsTransport};

use crate::config::Config;
use crate::domain::{MessageId, PhoneFormat, PhoneNumber};
use crate::error::{TransportError, TransportResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// `Api-Version` header value the vendor's non-token protocols require.
const API_VERSION_DATE: &str = "2014-05-07";

/// Extra headers the vendor's own web client sends; the `web-client` variant
/// mimics a browser session on top of Basic authorization.
const WEB_CLIENT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Origin", "https://www.pushbullet.com"),
    ("Referer", "https://www.pushbullet.com/"),
    ("Sec-Fetch-Dest", "empty"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "same-site"),
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36",
    ),
    ("X-User-Agent", "Pushbullet Website 162"),
];

/// Which of the vendor's wire protocols to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVariant {
    /// POST `/v3/create-text` with Basic authorization.
    #[default]
    CreateText,

    /// POST `/v2/texts` with an `Access-Token` header.
    TextsV2,

    /// POST `/v3/create-text` with the header set the vendor's web client
    /// sends.
    WebClient,
}

impl ApiVariant {
    /// Endpoint path, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::CreateText | Self::WebClient => "/v3/create-text",
            Self::TextsV2 => "/v2/texts",
        }
    }

    /// The phone-number format this wire protocol natively expects.
    pub fn native_phone_format(&self) -> PhoneFormat {
        match self {
            Self::TextsV2 => PhoneFormat::E164,
            Self::CreateText | Self::WebClient => PhoneFormat::TenDigit,
        }
    }
}

impl fmt::Display for ApiVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateText => write!(f, "create-text"),
            Self::TextsV2 => write!(f, "texts-v2"),
            Self::WebClient => write!(f, "web-client"),
        }
    }
}

impl FromStr for ApiVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create-text" => Ok(Self::CreateText),
            "texts-v2" => Ok(Self::TextsV2),
            "web-client" => Ok(Self::WebClient),
            other => Err(format!(
                "Unrecognized API variant {:?} (expected create-text, texts-v2, or web-client)",
                other
            )),
        }
    }
}

/// Payload of one SMS send request. Identical across all wire variants.
#[derive(Debug, Serialize)]
struct SmsRequestData<'a> {
    target_device_iden: &'a str,
    addresses: Vec<&'a str>,
    message: &'a str,
    guid: String,
}

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    data: SmsRequestData<'a>,
}

/// Body of a successful send response.
#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    iden: MessageId,
}

/// Per-request idempotency token: a hyphen-less UUIDv4 truncated to the
/// 22 characters the vendor accepts.
fn request_guid() -> String {
    let mut guid = Uuid::new_v4().simple().to_string();
    guid.truncate(22);
    guid
}

/// Synchronous HTTP client for the Pushbullet SMS endpoint.
///
/// The `ureq` agent (connection pool) is created once and shared behind an
/// `Arc`; cloning the client is cheap and every clone drives the same pool,
/// which is safe for concurrent use.
#[derive(Clone)]
pub struct PushbulletClient {
    /// API base URL
    base_url: String,

    /// Access token for authentication
    api_key: String,

    /// `iden` of the device that relays the SMS messages
    device_iden: String,

    /// Wire protocol to speak
    variant: ApiVariant,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl PushbulletClient {
    /// Create a new PushbulletClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            device_iden: config.device_iden.clone(),
            variant: config.api_variant,
            agent: Arc::new(agent),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(
        base_url: String,
        api_key: String,
        device_iden: String,
        variant: ApiVariant,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            device_iden,
            variant,
            agent: Arc::new(agent),
        }
    }

    /// Build the endpoint URL for the active variant.
    fn build_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}{}", base, self.variant.path())
    }

    /// Apply the active variant's authentication and protocol headers.
    fn apply_headers(&self, request: ureq::Request) -> ureq::Request {
        match self.variant {
            ApiVariant::CreateText => request
                .set("Authorization", &format!("Basic {}", self.api_key))
                .set("Accept", "*/*")
                .set("Api-Version", API_VERSION_DATE)
                .set("Content-Type", "application/json"),
            ApiVariant::TextsV2 => request.set("Access-Token", &self.api_key),
            ApiVariant::WebClient => {
                let mut request = request
                    .set("Authorization", &format!("Basic {}", self.api_key))
                    .set("Api-Version", API_VERSION_DATE)
                    .set("Content-Type", "application/json");
                for (name, value) in WEB_CLIENT_HEADERS {
                    request = request.set(name, value);
                }
                request
            }
        }
    }

    /// Send an SMS message to the given phone numbers.
    ///
    /// Multiple numbers are delivered by the vendor as a single GROUP
    /// message, not as individual texts. Returns the `iden` of the sent
    /// message.
    pub fn send_sms(
        &self,
        phone_numbers: &[PhoneNumber],
        message: &str,
    ) -> TransportResult<MessageId> {
        if phone_numbers.is_empty() {
            return Err(TransportError::InvalidRequest(
                "at least one phone number is required".to_string(),
            ));
        }

        let url = self.build_url();
        let request = SendSmsRequest {
            data: SmsRequestData {
                target_device_iden: &self.device_iden,
                addresses: phone_numbers.iter().map(PhoneNumber::as_str).collect(),
                message,
                guid: request_guid(),
            },
        };

        tracing::debug!(
            variant = %self.variant,
            recipients = phone_numbers.len(),
            "POST {}",
            url
        );

        let response = self
            .apply_headers(self.agent.post(&url))
            .send_json(&request)
            .map_err(|e| self.map_error(e))?;

        let body = response
            .into_string()
            .map_err(|e| TransportError::HttpError(e.to_string()))?;
        let parsed: SendSmsResponse = serde_json::from_str(&body)?;

        Ok(parsed.iden)
    }

    /// Map a ureq error to a TransportError.
    fn map_error(&self, error: ureq::Error) -> TransportError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => TransportError::Unauthorized,
                    _ => TransportError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    TransportError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    TransportError::Timeout
                } else {
                    TransportError::HttpError(transport.to_string())
                }
            }
        }
    }
}
