// --- File: crates/padelbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default backend base URL, used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Fixed key under which the session token is kept in client-side storage.
pub const DEFAULT_STORAGE_KEY: &str = "token";

// --- Backend API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // Loaded via PADELBOOK__API__BASE_URL
    /// Request timeout in seconds. Unset means requests may hang indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

// --- Session Storage Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    /// File backing the key/value session storage.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// The configured token file, or `<config dir>/padelbook/session.json`.
    pub fn resolved_token_file(&self) -> Option<PathBuf> {
        self.token_file.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("padelbook").join("session.json"))
        })
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
