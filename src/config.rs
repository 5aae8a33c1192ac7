use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::GatewaySettings;

pub const APP_NAME: &str = "weather-relay";

/// Process-wide settings, read once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind_address: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub service_name: String,
    pub default_forecast_city: String,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: 3000,
            api_key: None,
            service_name: "Mosam Weather".into(),
            default_forecast_city: "Dhaka".into(),
            upstream: UpstreamConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://mosam-weather-for-micro-it.vercel.app".into(),
                "http://localhost:5173".into(),
            ],
            allowed_methods: vec!["GET".into(), "POST".into()],
            allow_credentials: true,
        }
    }
}

impl RelayConfig {
    /// Load from `path`, creating it with the defaults when missing.
    ///
    /// Without a path the per-user config file is read if it exists. Nothing is
    /// written there, and an unusable config directory only yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, confy::ConfyError> {
        if let Some(path) = path {
            return confy::load_path(path);
        }

        match confy::get_configuration_file_path(APP_NAME, None) {
            Ok(default_path) => Self::load_if_present(&default_path),
            Err(e) => {
                warn!("No usable config directory ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    fn load_if_present(path: &Path) -> Result<Self, confy::ConfyError> {
        if path.is_file() {
            info!("Loading configuration from {}", path.display());
            confy::load_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command line / environment values on top of the file.
    pub fn with_overrides(mut self, bind: Option<String>, port: Option<u16>, api_key: Option<String>) -> Self {
        if let Some(bind) = bind {
            self.bind_address = bind;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            api_key: self.api_key().unwrap_or_default().to_string(),
            default_forecast_city: self.default_forecast_city.clone(),
            service_name: self.service_name.clone(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
