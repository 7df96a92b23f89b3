use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Runtime settings of the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the REST backend, without the endpoint path.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// JSON catalog used when the backend cannot provide one.
    pub catalog_path: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            token: None,
            timeout_secs: 15,
            catalog_path: None,
            log_file: PathBuf::from("mealorder.log"),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the optional config file, then applies `overrides` on top.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog_path = Some(catalog_path);
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
