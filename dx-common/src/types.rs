///! DX index document types

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use crate::band::Band;
use crate::lenient;
use crate::rating::RatingLabel;

/// `vs_typical` above this percentage is flagged as a peak
pub const PEAK_THRESHOLD_PERCENT: f64 = 20.0;

/// Conditions for one band
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BandReading {
    /// Current signal-quality index
    #[serde(default, deserialize_with = "lenient::optional")]
    pub index: Option<f64>,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: RatingLabel,
    /// Predicted index for the next period
    #[serde(default, deserialize_with = "lenient::optional")]
    pub forecast: Option<f64>,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub forecast_rating: RatingLabel,
    /// Percent deviation from the historical baseline, kept as received
    #[serde(default, deserialize_with = "lenient::optional")]
    pub vs_typical: Option<Number>,
}

impl BandReading {
    pub fn index_or_zero(&self) -> f64 {
        self.index.unwrap_or(0.0)
    }

    pub fn forecast_or_zero(&self) -> f64 {
        self.forecast.unwrap_or(0.0)
    }

    /// `vs_typical` when it exceeds [`PEAK_THRESHOLD_PERCENT`]
    pub fn peak(&self) -> Option<&Number> {
        self.vs_typical
            .as_ref()
            .filter(|n| n.as_f64().is_some_and(|v| v > PEAK_THRESHOLD_PERCENT))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarData {
    /// Solar flux index
    #[serde(default, deserialize_with = "lenient::optional")]
    pub sfi: Option<f64>,
    /// Planetary K index
    #[serde(default, deserialize_with = "lenient::optional")]
    pub kp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StormForecast {
    /// 0-100
    #[serde(default, deserialize_with = "lenient::optional")]
    pub probability: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub predicted_kp: Option<f64>,
}

/// Typed view over the document served by the DX index API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionsDocument {
    /// ISO-8601, possibly `Z`-suffixed
    #[serde(default, deserialize_with = "lenient::optional")]
    pub updated: Option<String>,
    /// Keyed by band identifier; keys outside [`Band::ALL`] are kept but never shown
    #[serde(default, deserialize_with = "lenient::record_map")]
    pub bands: BTreeMap<String, BandReading>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub solar: Option<SolarData>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub storm: Option<StormForecast>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub source: Option<String>,
    /// Server-reported failure; overrides everything else in text reports
    #[serde(default, deserialize_with = "lenient::text")]
    pub error: Option<String>,
}

impl ConditionsDocument {
    /// Build the typed view from a decoded JSON value.
    ///
    /// Returns `None` when the value is not a JSON object.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        ConditionsDocument::deserialize(value).ok()
    }

    pub fn band(&self, band: Band) -> Option<&BandReading> {
        self.bands.get(band.as_str())
    }

    /// Requested bands that the document actually reports, in selection order
    pub fn readings<'a>(
        &'a self,
        selection: &'a [Band],
    ) -> impl Iterator<Item = (Band, &'a BandReading)> + 'a {
        selection
            .iter()
            .filter_map(move |band| self.band(*band).map(|reading| (*band, reading)))
    }
}
