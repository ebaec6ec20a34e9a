///! Command-line arguments for `dx`.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use dx_common::{BandError, SymbolSet, select_bands};

use crate::config::{API_URL_ENV, DxConfig, OutputMode, Settings};

const EXAMPLES: &str = "\
Examples:
  dx                      Show all bands
  dx 10m 15m              Show specific bands
  dx --compact            One-line output
  dx --json               JSON for scripting
  dx --watch              Auto-refresh every 60s
  dx --alert Good         Exit 0 if any band >= Good

Data source: https://tinyurl.com/HFDXProp
73 de HB9VQQ";

/// DX Index CLI - Quick HF propagation check
#[derive(Parser, Debug)]
#[command(name = "dx", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Specific bands to show (e.g. 10m 15m)
    pub bands: Vec<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// One-line compact output
    #[arg(long)]
    pub compact: bool,

    /// ASCII symbols (no emoji)
    #[arg(long)]
    pub ascii: bool,

    /// Auto-refresh until Ctrl+C
    #[arg(long)]
    pub watch: bool,

    /// Refresh interval for --watch in seconds (default: 60)
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Exit 0 if any band >= RATING (VeryPoor/Poor/Fair/Good/Excellent)
    #[arg(long, value_name = "RATING")]
    pub alert: Option<String>,

    /// API endpoint URL (default: https://wspr.hb9vqq.ch/api/dx.json)
    #[arg(long, env = API_URL_ENV)]
    pub url: Option<String>,

    /// Optional TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Diagnostic verbosity on stderr (trace/debug/info/warn/error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Config file contents, or defaults when `--config` is not given
    pub fn load_config(&self) -> anyhow::Result<DxConfig> {
        match &self.config {
            Some(path) => DxConfig::from_file(path),
            None => Ok(DxConfig::default()),
        }
    }

    pub fn log_level<'a>(&'a self, config: &'a DxConfig) -> &'a str {
        self.log_level.as_deref().unwrap_or(&config.log_level)
    }

    /// Merge flags over the config file. Flags always win.
    pub fn into_settings(self, config: &DxConfig) -> Result<Settings, BandError> {
        let bands = select_bands(&self.bands)?;

        let mode = if self.json {
            OutputMode::Json
        } else if self.compact {
            OutputMode::Compact
        } else {
            OutputMode::Standard
        };

        let symbols = if self.ascii || config.ascii {
            SymbolSet::Ascii
        } else {
            SymbolSet::Graphical
        };

        Ok(Settings {
            api_url: self.url.unwrap_or_else(|| config.api_url.clone()),
            bands,
            mode,
            symbols,
            alert: self.alert,
            watch: self.watch,
            interval: Duration::from_secs(self.interval.unwrap_or(config.interval_secs)),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}
