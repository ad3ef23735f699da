use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Backend the dashboard talks to when no config file or override is given.
pub const DEFAULT_API_HOST: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardToml {
    #[serde(default = "default_api_host")]
    pub api_host: String,
}

impl Default for DashboardToml {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
        }
    }
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub async fn load(path: &Path) -> Result<DashboardToml, ConfigError> {
    debug!(path = %path.display(), "loading config");

    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let config: DashboardToml = toml::from_str(&contents)?;
            info!(
                path = %path.display(),
                api_host = %config.api_host,
                "loaded config"
            );
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(DashboardToml::default())
        }
        Err(e) => Err(ConfigError::Read(e)),
    }
}
