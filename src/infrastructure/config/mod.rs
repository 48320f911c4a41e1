//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Dashboard configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub stores: StoresConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Where the logged-in identity is kept between runs
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    pub path: PathBuf,
    pub key: String,
}

/// Store tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StoresConfig {
    pub flash_ttl_ms: u64,
    pub product_id_seed: u64,
    pub user_id_seed: u64,
    pub flat_order_value: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fakestoreapi.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".shop-admin/session.json"),
            key: "user".to_string(),
        }
    }
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            flash_ttl_ms: 3000,
            product_id_seed: 1000,
            user_id_seed: 10,
            flat_order_value: 150.0,
        }
    }
}

impl StoresConfig {
    pub fn flash_ttl(&self) -> Duration {
        Duration::from_millis(self.flash_ttl_ms)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(url) = std::env::var("SHOP_ADMIN_API_URL") {
            config.api.base_url = url;
        }

        if let Ok(timeout) = std::env::var("SHOP_ADMIN_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(seconds) => config.api.timeout_seconds = seconds,
                Err(_) => tracing::warn!("Ignoring invalid SHOP_ADMIN_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(path) = std::env::var("SHOP_ADMIN_SESSION_PATH") {
            config.session.path = PathBuf::from(path);
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("api.base-url must not be empty".to_string()));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("api.timeout-seconds must be positive".to_string()));
        }
        if !self.stores.flat_order_value.is_finite() || self.stores.flat_order_value < 0.0 {
            return Err(ConfigError::InvalidValue(
                "stores.flat-order-value must be a non-negative amount".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
