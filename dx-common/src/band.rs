use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HF bands reported by the DX index service, in canonical display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "10m")]
    M10,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "20m")]
    M20,
    #[serde(rename = "40m")]
    M40,
}

impl Band {
    /// All bands, canonical order
    pub const ALL: [Band; 4] = [Band::M10, Band::M15, Band::M20, Band::M40];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::M10 => "10m",
            Band::M15 => "15m",
            Band::M20 => "20m",
            Band::M40 => "40m",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .into_iter()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| format!("Unknown band: {}", s))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandError {
    #[error("No valid bands specified. Use: 10m, 15m, 20m, 40m")]
    NoValidBands,
}

/// Resolve the user's band arguments into a canonical selection.
///
/// An empty request selects every band. Otherwise unknown identifiers are
/// dropped and the result is the intersection with [`Band::ALL`], always in
/// canonical order with no duplicates.
pub fn select_bands<S: AsRef<str>>(requested: &[S]) -> Result<Vec<Band>, BandError> {
    if requested.is_empty() {
        return Ok(Band::ALL.to_vec());
    }

    let selected: Vec<Band> = Band::ALL
        .into_iter()
        .filter(|band| requested.iter().any(|r| r.as_ref() == band.as_str()))
        .collect();

    if selected.is_empty() {
        return Err(BandError::NoValidBands);
    }

    Ok(selected)
}

/// True when the selection covers every band (JSON passthrough condition)
pub fn is_full_selection(bands: &[Band]) -> bool {
    Band::ALL.iter().all(|band| bands.contains(band))
}
