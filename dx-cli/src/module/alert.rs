///! Rating threshold checks for `--alert`.
///!
///! Used from scripts and cron jobs: the process exits 0 when any selected
///! band is at or above the requested rating, 1 otherwise.

use dx_common::{Band, ConditionsDocument, Rating};

/// First selected band whose rating meets `threshold`.
///
/// Returns `None` when `threshold` is not one of the five scale names, when
/// no selected band is present, or when no band qualifies. A band without a
/// rating counts as `VeryPoor`; ratings outside the scale never qualify.
pub fn first_match(
    document: &ConditionsDocument,
    bands: &[Band],
    threshold: &str,
) -> Option<(Band, Rating)> {
    let minimum = Rating::from_name(threshold)?;

    document.readings(bands).find_map(|(band, reading)| {
        reading
            .rating
            .comparable()
            .filter(|rating| *rating >= minimum)
            .map(|rating| (band, rating))
    })
}

/// True when any selected band meets `threshold`
pub fn evaluate(document: &ConditionsDocument, bands: &[Band], threshold: &str) -> bool {
    match first_match(document, bands, threshold) {
        Some((band, rating)) => {
            tracing::debug!("Alert threshold {} met by {} ({})", threshold, band, rating);
            true
        }
        None => {
            tracing::debug!("Alert threshold {} not met", threshold);
            false
        }
    }
}
