//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ConsoleError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add default config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with APP_ prefix
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConsoleError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConsoleError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let defaults = super::types::StoreConfig::default();
    let store = super::types::StoreConfig {
        base_url: std::env::var("STRATEGY_STORE_URL").unwrap_or(defaults.base_url),
        auth_token: std::env::var("STRATEGY_STORE_TOKEN").ok(),
        request_timeout_seconds: std::env::var("STRATEGY_STORE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout_seconds),
    };

    Ok(AppConfig {
        store,
        settings: super::types::AppSettings::default(),
    })
}
