use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use webara_workspace::{PublishSettings, DEFAULT_PUBLISH_DOMAIN};

pub const DEFAULT_CONFIG_NAME: &str = "webara.config.json";

/// Webara configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON record per project
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Domain suffix for published sites
    #[serde(default = "default_publish_domain")]
    pub publish_domain: String,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store_dir() -> String {
    ".webara/projects".to_string()
}

fn default_publish_domain() -> String {
    DEFAULT_PUBLISH_DOMAIN.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Absolute path of the project store
    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }

    pub fn publish_settings(&self) -> PublishSettings {
        PublishSettings {
            domain: self.publish_domain.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            publish_domain: default_publish_domain(),
            log_level: default_log_level(),
        }
    }
}
