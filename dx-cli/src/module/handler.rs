///! Single fetch → report cycle.
///!
///! Picks the alert check or one of the three renderers based on the
///! resolved settings. The watch loop reuses `render_once` for each refresh.

use anyhow::Result;
use std::process::ExitCode;

use crate::config::{OutputMode, Settings};
use super::alert;
use super::conditions::{ConditionsFetcher, ConditionsSnapshot};
use super::renderer::{CompactRenderer, JsonRenderer, StandardRenderer};

/// Result of one single-shot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print on stdout
    Report(String),
    /// `--alert` result; nothing is printed
    Alert(bool),
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Report(_) | Outcome::Alert(true) => ExitCode::SUCCESS,
            Outcome::Alert(false) => ExitCode::from(1),
        }
    }
}

/// Render a snapshot in the configured output mode
pub fn render_report(settings: &Settings, snapshot: &ConditionsSnapshot) -> Result<String> {
    let bands = &settings.bands;
    let report = match settings.mode {
        OutputMode::Json => JsonRenderer.render(snapshot, bands)?,
        OutputMode::Compact => CompactRenderer.render(&snapshot.document, bands),
        OutputMode::Standard => StandardRenderer::new(settings.symbols).render(&snapshot.document, bands),
    };
    Ok(report)
}

/// Owns the fetcher and the settings for one process run
pub struct ConditionsHandler {
    fetcher: ConditionsFetcher,
    settings: Settings,
}

impl ConditionsHandler {
    pub fn new(settings: Settings) -> Result<Self> {
        let fetcher = ConditionsFetcher::new(settings.api_url.clone(), settings.timeout)?;
        Ok(Self { fetcher, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch once; `--alert` takes precedence over every output mode
    pub async fn handle_once(&self) -> Result<Outcome> {
        let snapshot = self.fetcher.fetch().await?;

        if let Some(threshold) = &self.settings.alert {
            let met = alert::evaluate(&snapshot.document, &self.settings.bands, threshold);
            return Ok(Outcome::Alert(met));
        }

        Ok(Outcome::Report(render_report(&self.settings, &snapshot)?))
    }

    /// Fetch once and render, ignoring `--alert`
    pub async fn render_once(&self) -> Result<String> {
        let snapshot = self.fetcher.fetch().await?;
        render_report(&self.settings, &snapshot)
    }
}
