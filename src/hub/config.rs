//! Configuration for the hub endpoint.
//!
//! Configuration is resolved in the following order (later overrides earlier):
//! 1. Defaults (http://localhost:8080)
//! 2. ~/.memehub/config.toml
//! 3. MEMEHUB_URL environment variable

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port for the hub.
pub const DEFAULT_HUB_PORT: u16 = 8080;

/// Environment variable that overrides the hub URL.
pub const HUB_URL_ENV: &str = "MEMEHUB_URL";

/// Hub configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Base URL for the hub API (e.g., http://localhost:8080).
    pub url: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            url: format!("http://localhost:{}", DEFAULT_HUB_PORT),
        }
    }
}

/// TOML structure for ~/.memehub/config.toml.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    hub: HubSection,
}

#[derive(Debug, Deserialize, Default)]
struct HubSection {
    url: Option<String>,
}

impl HubConfig {
    /// Load configuration from file and environment.
    pub fn load() -> Self {
        let mut config = match Self::config_file_path() {
            Some(config_path) => Self::from_file(&config_path),
            None => HubConfig::default(),
        };

        // Environment variable overrides everything
        if let Ok(url) = std::env::var(HUB_URL_ENV) {
            config.url = url;
        }

        config
    }

    /// Load configuration from a specific TOML file.
    ///
    /// A missing or unparseable file silently falls back to defaults; the
    /// client should still come up when the config is absent or stale.
    pub fn from_file(path: &Path) -> Self {
        let mut config = HubConfig::default();

        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(path) {
                if let Ok(file_config) = toml::from_str::<ConfigFile>(&contents) {
                    if let Some(url) = file_config.hub.url {
                        config.url = url;
                    }
                }
            }
        }

        config
    }

    /// Get the path to the config file (~/.memehub/config.toml).
    pub fn config_file_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".memehub").join("config.toml"))
    }
}
