//! Typed client for the remote device-control API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Wire types (mirror what the remote API exposes)
// ---------------------------------------------------------------------------

/// Device control action, mapped to an action-specific endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::On => write!(f, "on"),
            Action::Off => write!(f, "off"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub device_name: String,
    pub enroll_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub enroll_id: String,
}

/// Acknowledgement body: the server's human-readable outcome, when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOk {
    pub token: String,
    pub device_name: String,
    pub enroll_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub status: String,
    pub last_value: String,
}

/// One action-history row, ordered as returned by the server. The timestamp
/// is opaque text and is rendered verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub action: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandRequest<'a> {
    device_id: &'a str,
}

// ---------------------------------------------------------------------------
// DeviceApi — the seam the control flow talks through
// ---------------------------------------------------------------------------

/// One HTTP request per call, one attempt per invocation: no retries, no
/// explicit timeouts, no backoff. `register` and `login` are public;
/// the remaining operations take the bearer token by signature.
#[async_trait]
pub trait DeviceApi {
    async fn register(&self, device_name: &str, enroll_id: &str) -> Result<Ack>;
    async fn login(&self, enroll_id: &str) -> Result<LoginOk>;
    async fn fetch_status(&self, token: &str) -> Result<DeviceStatus>;
    async fn send_command(&self, token: &str, action: Action, device_id: &str) -> Result<()>;
    async fn fetch_logs(&self, token: &str) -> Result<Vec<LogEntry>>;
}

// ---------------------------------------------------------------------------
// HttpApi — reqwest implementation
// ---------------------------------------------------------------------------

pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn connect_error(url: &str, err: reqwest::Error) -> Error {
        Error::Connect {
            url: url.to_string(),
            detail: err.to_string(),
        }
    }

    /// Turn a non-2xx response into `Error::Status`, preserving the server's
    /// JSON `message` when the body carries one.
    async fn rejection(url: &str, resp: reqwest::Response) -> Error {
        let status = resp.status().as_u16();
        let message = match resp.bytes().await {
            Ok(bytes) => serde_json::from_slice::<Ack>(&bytes)
                .ok()
                .and_then(|ack| ack.message),
            Err(_) => None,
        };
        Error::Status {
            status,
            url: url.to_string(),
            message,
        }
    }

    async fn parse_body<T: serde::de::DeserializeOwned>(
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T> {
        let bytes = resp.bytes().await.map_err(|e| Error::Body {
            url: url.to_string(),
            detail: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Body {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl DeviceApi for HttpApi {
    async fn register(&self, device_name: &str, enroll_id: &str) -> Result<Ack> {
        let url = self.endpoint("register-device");
        let body = RegisterRequest {
            device_name: device_name.to_string(),
            enroll_id: enroll_id.to_string(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::connect_error(&url, e))?;

        if !resp.status().is_success() {
            return Err(Self::rejection(&url, resp).await);
        }

        Self::parse_body(&url, resp).await
    }

    async fn login(&self, enroll_id: &str) -> Result<LoginOk> {
        let url = self.endpoint("login-device");
        let body = LoginRequest {
            enroll_id: enroll_id.to_string(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::connect_error(&url, e))?;

        if !resp.status().is_success() {
            return Err(Self::rejection(&url, resp).await);
        }

        Self::parse_body(&url, resp).await
    }

    async fn fetch_status(&self, token: &str) -> Result<DeviceStatus> {
        let url = self.endpoint("device-status");
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| Self::connect_error(&url, e))?;

        if !resp.status().is_success() {
            return Err(Self::rejection(&url, resp).await);
        }

        Self::parse_body(&url, resp).await
    }

    async fn send_command(&self, token: &str, action: Action, device_id: &str) -> Result<()> {
        let path = match action {
            Action::On => "turn-on-device",
            Action::Off => "turn-off-device",
        };
        let url = self.endpoint(path);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&CommandRequest { device_id })
            .send()
            .await
            .map_err(|e| Self::connect_error(&url, e))?;

        if !resp.status().is_success() {
            return Err(Self::rejection(&url, resp).await);
        }

        // Success body is implementation-defined; the refresh that follows
        // re-reads authoritative state.
        Ok(())
    }

    async fn fetch_logs(&self, token: &str) -> Result<Vec<LogEntry>> {
        let url = self.endpoint("device-logs");
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| Self::connect_error(&url, e))?;

        if !resp.status().is_success() {
            return Err(Self::rejection(&url, resp).await);
        }

        Self::parse_body(&url, resp).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
