//! Settings: base host and session-file location, with full defaults and an
//! optional TOML override file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Base host of the remote device-control API.
pub const DEFAULT_BASE_URL: &str = "https://desarrolloiot.onrender.com";
/// Where the session token and identity fields are persisted.
pub const DEFAULT_SESSION_FILE: &str = ".device-console/session.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub session_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            session_file: DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Parse a TOML settings file. Absent sections and keys fall back to
    /// their defaults; a missing or unreadable file is an error (pass no
    /// path to run on pure defaults instead).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| Error::Config {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
