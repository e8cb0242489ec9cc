//! Configuration types

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Strategy store connection settings
    #[serde(default)]
    pub store: StoreConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            settings: AppSettings::default(),
        }
    }
}

/// Strategy store connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the admin API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for authenticated requests
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Rows requested per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:4000/api/admin".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> u32 {
    10
}
