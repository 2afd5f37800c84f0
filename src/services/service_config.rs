use std::env;

use serde::Deserialize;
use thiserror::Error;

pub const SERVICE_URL_ENV: &str = "REALTY_SERVICE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read service config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse service config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Where the calculation service lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub endpoint: String,
    /// Transport timeout for each request; none when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            endpoint: "simular".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub async fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Resolves the effective config: explicit URL, then the environment,
    /// then the config file, then defaults.
    pub async fn resolve(
        config_path: Option<&str>,
        service_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_yaml_file(path).await?,
            None => Self::default(),
        };
        let env_url = env::var(SERVICE_URL_ENV).ok();
        if let Some(url) = service_url.map(str::to_string).or(env_url) {
            config.base_url = url;
        }
        Ok(config)
    }

    pub fn simulation_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{endpoint}")
        }
    }
}
