//! Application configuration storage
//!
//! `config.json` in the data directory holds the inference and store
//! settings. A missing file means defaults; a few environment variables
//! override what the file says.

use std::path::{Path, PathBuf};

use inference::InferenceConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{env, paths};

/// Where templates are persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Template directory; relative paths are resolved against the data dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub async fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = data_dir.join(paths::CONFIG_FILE);

        if !config_path.exists() {
            log::debug!("No config at {:?}; using defaults", config_path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).await?;
        let config = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        log::debug!("Loaded configuration from {:?}", config_path);
        Ok(config)
    }

    /// Apply `BLOCKWRIGHT_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(backend) = lookup(env::BACKEND) {
            self.inference.backend = backend;
        }
        if let Some(base_url) = lookup(env::BASE_URL) {
            self.inference.base_url = Some(base_url);
        }
        if let Some(model) = lookup(env::MODEL) {
            self.inference.model = Some(model);
        }
    }

    /// Template directory for this configuration
    pub fn templates_dir(&self, data_dir: &Path) -> PathBuf {
        match self.store.path {
            Some(ref path) if path.is_absolute() => path.clone(),
            Some(ref path) => data_dir.join(path),
            None => data_dir.join(paths::TEMPLATES_DIR),
        }
    }
}

/// Platform data directory for Blockwright, falling back to the working dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(paths::APP_DIR)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
}
