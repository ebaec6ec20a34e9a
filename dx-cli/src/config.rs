use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use dx_common::{Band, SymbolSet};

/// Public DX index endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://wspr.hb9vqq.ch/api/dx.json";

/// Environment variable overriding the endpoint
pub const API_URL_ENV: &str = "DX_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DxConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub ascii: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_interval_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DxConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            ascii: false,
        }
    }
}

impl DxConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Which report to produce for each fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Standard,
    Compact,
    Json,
}

/// Fully resolved run settings handed to the handler and watch loop
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub bands: Vec<Band>,
    pub mode: OutputMode,
    pub symbols: SymbolSet,
    /// Rating threshold name from `--alert`, validated only at evaluation time
    pub alert: Option<String>,
    pub watch: bool,
    pub interval: Duration,
    pub timeout: Duration,
}
