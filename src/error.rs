//! Crate-level error type.

use thiserror::Error;

/// Errors that can occur anywhere in the client.
///
/// Each variant carries enough context to diagnose the failure without
/// needing to inspect the originating error directly.
#[derive(Debug, Error)]
pub enum Error {
    /// A TCP-level connection could not be established, or the request
    /// never completed.
    #[error("Connection failed to {url}: {detail}")]
    Connect { url: String, detail: String },

    /// The remote server replied with a non-2xx HTTP status code. When the
    /// response body carried a JSON `message`, it is preserved here.
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// A 2xx response body could not be parsed as the expected JSON shape.
    #[error("Unreadable response from {url}: {detail}")]
    Body { url: String, detail: String },

    /// The session file could not be read, written, or parsed.
    #[error("Session storage failed: {detail}")]
    Storage { detail: String },

    /// The settings file could not be read or parsed.
    #[error("Bad configuration in {path}: {detail}")]
    Config { path: String, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The server-provided rejection message, when one was parsed out of a
    /// non-2xx response body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True for failures where the request never completed (taxonomy (c)):
    /// these surface as a connectivity message, never a server rejection.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connect { .. } | Error::Body { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_contains_code_and_url() {
        let err = Error::Status {
            status: 503,
            url: "https://api.example.com/device-status".to_string(),
            message: None,
        };
        let s = err.to_string();
        assert!(s.contains("503"), "expected status in display: {s}");
        assert!(s.contains("device-status"), "expected url in display: {s}");
    }

    #[test]
    fn connect_display_contains_detail() {
        let err = Error::Connect {
            url: "https://api.example.com".to_string(),
            detail: "connection refused".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("connection refused"), "detail in display: {s}");
    }

    #[test]
    fn server_message_present_only_on_status() {
        let rejected = Error::Status {
            status: 409,
            url: "u".to_string(),
            message: Some("Device already registered".to_string()),
        };
        assert_eq!(rejected.server_message(), Some("Device already registered"));

        let connect = Error::Connect {
            url: "u".to_string(),
            detail: "refused".to_string(),
        };
        assert_eq!(connect.server_message(), None);
    }

    #[test]
    fn connectivity_classification() {
        let connect = Error::Connect {
            url: "u".to_string(),
            detail: "refused".to_string(),
        };
        let body = Error::Body {
            url: "u".to_string(),
            detail: "not json".to_string(),
        };
        let status = Error::Status {
            status: 404,
            url: "u".to_string(),
            message: None,
        };
        assert!(connect.is_connectivity());
        assert!(body.is_connectivity());
        assert!(!status.is_connectivity());
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        let err = Error::Storage {
            detail: "disk full".to_string(),
        };
        assert_error(&err);
    }
}
