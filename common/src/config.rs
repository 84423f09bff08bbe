use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::yaml_include::load_yaml_string_with_includes;

pub const DEFAULT_ORDER_PATH: &str = "/order/";
pub const BASE_URL_ENV: &str = "ORDER_VIEWER_BASE_URL";
pub const ORDER_PATH_ENV: &str = "ORDER_VIEWER_ORDER_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Scan(#[from] yaml_rust2::ScanError),

    #[error("failed to emit merged YAML: {0}")]
    Emit(#[from] yaml_rust2::EmitError),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("config include cycle at {path}")]
    IncludeCycle { path: PathBuf },

    #[error("config file {path} is empty")]
    Empty { path: PathBuf },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    /// Scheme and authority of the order service, e.g. `http://localhost:8081`.
    pub base_url: String,
    #[serde(default = "default_order_path")]
    pub order_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Wrap rendered fragments in a full HTML document.
    #[serde(default)]
    pub standalone_page: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            order_path: default_order_path(),
            log_level: default_log_level(),
            standalone_page: false,
        }
    }
}

fn default_order_path() -> String {
    DEFAULT_ORDER_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub common: CommonConfig,
    pub viewer: ViewerConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = load_yaml_string_with_includes(config_path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = serde_yml::from_str(contents)?;
        Ok(config)
    }

    /// Applies `ORDER_VIEWER_*` variables from the process environment (and `.env`).
    pub fn apply_env_overrides(&mut self) {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            info!("{} set, overriding base_url", BASE_URL_ENV);
            self.viewer.base_url = base_url;
        }
        if let Some(order_path) = lookup(ORDER_PATH_ENV) {
            info!("{} set, overriding order_path", ORDER_PATH_ENV);
            self.viewer.order_path = if order_path.starts_with('/') {
                order_path
            } else {
                format!("/{order_path}")
            };
        }
    }
}
