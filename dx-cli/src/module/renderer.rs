///! Text and JSON reports for DX conditions
///!
///! All renderers are pure: they take a document plus the selected bands and
///! return the string to print.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dx_common::{Band, BandReading, ConditionsDocument, SymbolSet, is_full_selection};
use serde_json::{Map, Value};

use super::conditions::ConditionsSnapshot;

const BANNER: &str = "═══════════════════════════════════════════════════════";
const TITLE: &str = "  HF DX INDEX - Current Conditions";
const SIGN_OFF: &str = "73 de HB9VQQ";
const DEFAULT_SOURCE: &str = "wspr.hb9vqq.ch";
const RULE_WIDTH: usize = 48;

const PEAK_ARROW: &str = "⬆";
const WARNING_SIGN: &str = "\u{26a0}\u{fe0f}";

const STORM_WARNING_PERCENT: f64 = 50.0;
const STORM_NOTICE_PERCENT: f64 = 30.0;

/// Text shown when the service reports a failure
fn error_line(message: &str) -> String {
    format!("Error: {}", message)
}

/// Parse an ISO-8601 timestamp (`Z` meaning `+00:00`) into `YYYY-MM-DD HH:MM`.
///
/// The wall-clock time is printed as received; an offset is not applied.
/// Returns `None` when nothing matches.
fn format_updated(updated: &str) -> Option<String> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let normalized = updated.trim().replace('Z', "+00:00");

    let parsed = DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(parsed.format("%Y-%m-%d %H:%M").to_string())
}

/// Strip an `http://` or `https://` scheme for display
fn display_source(source: &str) -> &str {
    source
        .strip_prefix("https://")
        .or_else(|| source.strip_prefix("http://"))
        .unwrap_or(source)
}

/// Multi-line table report
pub struct StandardRenderer {
    symbols: SymbolSet,
}

impl StandardRenderer {
    pub fn new(symbols: SymbolSet) -> Self {
        Self { symbols }
    }

    pub fn render(&self, document: &ConditionsDocument, bands: &[Band]) -> String {
        if let Some(error) = &document.error {
            return error_line(error);
        }

        let mut lines: Vec<String> = Vec::new();
        lines.push(String::new());
        lines.push(BANNER.to_string());
        lines.push(TITLE.to_string());
        lines.push(BANNER.to_string());

        if let Some(updated) = document.updated.as_deref().and_then(format_updated) {
            lines.push(format!("  Updated: {} UTC", updated));
        }
        lines.push(String::new());

        lines.push(format!(
            "  {:<6} {:<8} {:<18} {:<12}",
            "Band", "Now", "Rating", "Tomorrow"
        ));
        lines.push(format!("  {}", "─".repeat(RULE_WIDTH)));

        for (band, reading) in document.readings(bands) {
            lines.push(format!(
                "  {:<6} {:<8.1} {:<18} {:.1} ({})",
                band.as_str(),
                reading.index_or_zero(),
                self.rating_cell(reading),
                reading.forecast_or_zero(),
                reading.forecast_rating.display_name(),
            ));
        }
        lines.push(String::new());

        if let Some(line) = self.solar_line(document) {
            lines.push(line);
        }
        if let Some(line) = self.storm_line(document) {
            lines.push(line);
        }

        lines.push(BANNER.to_string());
        let source = document.source.as_deref().unwrap_or(DEFAULT_SOURCE);
        lines.push(format!("  Source: {} | {}", display_source(source), SIGN_OFF));
        lines.push(String::new());

        lines.join("\n")
    }

    fn rating_cell(&self, reading: &BandReading) -> String {
        let symbol = reading.rating.symbol(self.symbols);
        let name = reading.rating.display_name();

        match (reading.peak(), self.symbols) {
            (Some(peak), SymbolSet::Graphical) => {
                format!("{} {} {}+{}%", symbol, name, PEAK_ARROW, peak)
            }
            (Some(peak), SymbolSet::Ascii) => format!("{} {} +{}%", symbol, name, peak),
            (None, _) => format!("{} {}", symbol, name),
        }
    }

    fn solar_line(&self, document: &ConditionsDocument) -> Option<String> {
        let solar = document.solar.as_ref()?;
        let (sfi, kp) = (solar.sfi?, solar.kp?);
        Some(format!("  Solar: SFI {:.0} | Kp {:.1}", sfi, kp))
    }

    fn storm_line(&self, document: &ConditionsDocument) -> Option<String> {
        let storm = document.storm.as_ref()?;
        let probability = storm.probability?;
        let kp = storm.predicted_kp.unwrap_or(0.0);

        if probability >= STORM_WARNING_PERCENT {
            let (marker, arrow) = match self.symbols {
                SymbolSet::Graphical => (format!("{} ", WARNING_SIGN), "→"),
                SymbolSet::Ascii => ("[!]".to_string(), "->"),
            };
            Some(format!(
                "  {} Storm: {:.0}% probability {} Kp {:.1}",
                marker, probability, arrow, kp
            ))
        } else if probability >= STORM_NOTICE_PERCENT {
            // Only the warning line has an ASCII form
            Some(format!("  Storm: {:.0}% probability → Kp {:.1}", probability, kp))
        } else {
            None
        }
    }
}

/// One-line summary, e.g. `10m:Fair(42) | 15m:Good(58)`
pub struct CompactRenderer;

impl CompactRenderer {
    pub fn render(&self, document: &ConditionsDocument, bands: &[Band]) -> String {
        if let Some(error) = &document.error {
            return error_line(error);
        }

        document
            .readings(bands)
            .map(|(band, reading)| {
                let entry = format!(
                    "{}:{}({:.0})",
                    band.as_str(),
                    reading.rating.display_name(),
                    reading.index_or_zero()
                );
                match reading.peak() {
                    Some(peak) => format!("{}{}{}%", entry, PEAK_ARROW, peak),
                    None => entry,
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Pretty-printed JSON for scripting.
///
/// Works on the raw document, so unknown keys survive passthrough and a
/// server-reported `error` is serialized like any other field.
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn render(&self, snapshot: &ConditionsSnapshot, bands: &[Band]) -> serde_json::Result<String> {
        if is_full_selection(bands) {
            return serde_json::to_string_pretty(&snapshot.raw);
        }
        serde_json::to_string_pretty(&Self::reduce(&snapshot.raw, bands))
    }

    /// `updated`, the selected `bands`, `solar`, and `storm` only if the key existed
    fn reduce(raw: &Value, bands: &[Band]) -> Value {
        let source_bands = raw.get("bands").and_then(Value::as_object);

        let selected: Map<String, Value> = bands
            .iter()
            .filter_map(|band| {
                source_bands
                    .and_then(|map| map.get(band.as_str()))
                    .map(|reading| (band.as_str().to_string(), reading.clone()))
            })
            .collect();

        let mut reduced = Map::new();
        reduced.insert(
            "updated".to_string(),
            raw.get("updated").cloned().unwrap_or(Value::Null),
        );
        reduced.insert("bands".to_string(), Value::Object(selected));
        reduced.insert(
            "solar".to_string(),
            raw.get("solar").cloned().unwrap_or(Value::Null),
        );
        if let Some(storm) = raw.get("storm") {
            reduced.insert("storm".to_string(), storm.clone());
        }

        Value::Object(reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::conditions::parse_conditions_json;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "updated": "2025-12-10T14:30:00Z",
        "bands": {
            "10m": {"index": 42, "rating": "Fair", "forecast": 45, "forecast_rating": "Fair", "vs_typical": 25},
            "20m": {"index": 61.2, "rating": "Good", "forecast": 60, "forecast_rating": "Excellent"},
            "6m": {"index": 1}
        },
        "solar": {"sfi": 148, "kp": 2.33},
        "storm": {"probability": 55, "predicted_kp": 6.0},
        "source": "https://example.org"
    }"#;

    fn snapshot(body: &str) -> ConditionsSnapshot {
        parse_conditions_json(body).unwrap()
    }

    fn doc(value: Value) -> ConditionsDocument {
        ConditionsDocument::from_json_value(&value).unwrap()
    }

    #[test]
    fn test_standard_full_report() {
        let s = snapshot(SAMPLE);
        let out = StandardRenderer::new(SymbolSet::Graphical).render(&s.document, &Band::ALL);
        let expected = [
            "",
            BANNER,
            "  HF DX INDEX - Current Conditions",
            BANNER,
            "  Updated: 2025-12-10 14:30 UTC",
            "",
            "  Band   Now      Rating             Tomorrow    ",
            "  ────────────────────────────────────────────────",
            "  10m    42.0     🟠 Fair ⬆+25%       45.0 (Fair)",
            "  20m    61.2     🟢 Good             60.0 (Excellent)",
            "",
            "  Solar: SFI 148 | Kp 2.3",
            "  ⚠\u{fe0f}  Storm: 55% probability → Kp 6.0",
            BANNER,
            "  Source: example.org | 73 de HB9VQQ",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_standard_ascii_report() {
        let s = snapshot(SAMPLE);
        let out = StandardRenderer::new(SymbolSet::Ascii).render(&s.document, &Band::ALL);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[8], "  10m    42.0     [++  ] Fair +25%   45.0 (Fair)");
        assert_eq!(lines[9], "  20m    61.2     [+++ ] Good        60.0 (Excellent)");
        assert_eq!(lines[12], "  [!] Storm: 55% probability -> Kp 6.0");
        assert!(!out.contains('⬆'));
    }

    #[test]
    fn test_peak_example_single_band() {
        let d = doc(json!({"bands": {"10m": {"index": 42, "rating": "Fair", "forecast": 45, "forecast_rating": "Fair", "vs_typical": 25}}}));
        let standard = StandardRenderer::new(SymbolSet::Graphical).render(&d, &[Band::M10]);
        let row = standard.lines().find(|l| l.starts_with("  10m")).unwrap();
        assert!(row.contains("Fair ⬆+25%"), "row was {:?}", row);

        assert_eq!(CompactRenderer.render(&d, &[Band::M10]), "10m:Fair(42)⬆25%");
    }

    #[test]
    fn test_error_document_short_circuits() {
        let d = doc(json!({"error": "service unavailable", "bands": {"10m": {"index": 1}}}));
        assert_eq!(
            StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL),
            "Error: service unavailable"
        );
        assert_eq!(CompactRenderer.render(&d, &Band::ALL), "Error: service unavailable");
    }

    #[test]
    fn test_null_error_still_short_circuits() {
        let d = doc(json!({"error": null, "bands": {"10m": {"index": 1, "rating": "Fair"}}}));
        assert_eq!(CompactRenderer.render(&d, &Band::ALL), "Error: null");
        assert_eq!(
            StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL),
            "Error: null"
        );
    }

    #[test]
    fn test_storm_thresholds() {
        let renderer = StandardRenderer::new(SymbolSet::Graphical);
        let storm_lines = |probability: f64| -> Vec<String> {
            let d = doc(json!({"storm": {"probability": probability, "predicted_kp": 6.0}}));
            renderer
                .render(&d, &Band::ALL)
                .lines()
                .filter(|l| l.contains("Storm:"))
                .map(String::from)
                .collect()
        };

        assert_eq!(storm_lines(55.0), vec!["  ⚠\u{fe0f}  Storm: 55% probability → Kp 6.0"]);
        assert_eq!(storm_lines(50.0).len(), 1);
        assert!(storm_lines(50.0)[0].contains(WARNING_SIGN));
        assert_eq!(storm_lines(35.0), vec!["  Storm: 35% probability → Kp 6.0"]);
        assert_eq!(storm_lines(30.0), vec!["  Storm: 30% probability → Kp 6.0"]);
        assert!(storm_lines(10.0).is_empty());
    }

    #[test]
    fn test_ascii_notice_line_keeps_arrow() {
        let renderer = StandardRenderer::new(SymbolSet::Ascii);
        let d = doc(json!({"storm": {"probability": 35, "predicted_kp": 5.0}}));
        assert!(renderer.render(&d, &Band::ALL).contains("\n  Storm: 35% probability → Kp 5.0\n"));

        let d = doc(json!({"storm": {"probability": 70, "predicted_kp": 7.0}}));
        assert!(renderer.render(&d, &Band::ALL).contains("\n  [!] Storm: 70% probability -> Kp 7.0\n"));
    }

    #[test]
    fn test_storm_kp_defaults_to_zero() {
        let d = doc(json!({"storm": {"probability": 40}}));
        let out = StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL);
        assert!(out.contains("  Storm: 40% probability → Kp 0.0"));
    }

    #[test]
    fn test_solar_requires_both_values() {
        let renderer = StandardRenderer::new(SymbolSet::Graphical);
        let d = doc(json!({"solar": {"sfi": 120}}));
        assert!(!renderer.render(&d, &Band::ALL).contains("Solar:"));

        let d = doc(json!({"solar": {"sfi": 120.4, "kp": 0}}));
        assert!(renderer.render(&d, &Band::ALL).contains("  Solar: SFI 120 | Kp 0.0"));
    }

    #[test]
    fn test_source_display() {
        let renderer = StandardRenderer::new(SymbolSet::Graphical);
        let footer = |value: Value| -> String {
            renderer
                .render(&doc(value), &Band::ALL)
                .lines()
                .find(|l| l.starts_with("  Source:"))
                .unwrap()
                .to_string()
        };

        assert_eq!(footer(json!({"source": "https://example.org"})), "  Source: example.org | 73 de HB9VQQ");
        assert_eq!(footer(json!({"source": "http://example.org/api"})), "  Source: example.org/api | 73 de HB9VQQ");
        assert_eq!(footer(json!({})), "  Source: wspr.hb9vqq.ch | 73 de HB9VQQ");
    }

    #[test]
    fn test_format_updated() {
        assert_eq!(format_updated("2025-12-10T14:30:00Z").as_deref(), Some("2025-12-10 14:30"));
        assert_eq!(format_updated("2025-12-10T14:30:59.123+00:00").as_deref(), Some("2025-12-10 14:30"));
        assert_eq!(format_updated("2025-12-10T16:30:00+02:00").as_deref(), Some("2025-12-10 16:30"));
        assert_eq!(format_updated("2025-12-10T09:05:00-05:00").as_deref(), Some("2025-12-10 09:05"));
        assert_eq!(format_updated("2025-12-10T14:30:00").as_deref(), Some("2025-12-10 14:30"));
        assert_eq!(format_updated("2025-12-10").as_deref(), Some("2025-12-10 00:00"));
        assert_eq!(format_updated("yesterday"), None);
    }

    #[test]
    fn test_updated_line_keeps_wall_clock_time() {
        let d = doc(json!({"updated": "2025-12-10T16:30:00+02:00"}));
        let out = StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL);
        assert!(out.contains("\n  Updated: 2025-12-10 16:30 UTC\n"));
    }

    #[test]
    fn test_bad_timestamp_omits_line() {
        let d = doc(json!({"updated": "not a date", "bands": {}}));
        let out = StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL);
        assert!(!out.contains("Updated:"));
        assert!(out.contains("HF DX INDEX"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let d = doc(json!({"bands": {"15m": {}}}));
        let out = StandardRenderer::new(SymbolSet::Graphical).render(&d, &Band::ALL);
        assert!(out.contains("  15m    0.0      ? ?                0.0 (?)"), "{}", out);
        assert_eq!(CompactRenderer.render(&d, &Band::ALL), "15m:?(0)");
    }

    #[test]
    fn test_unselected_and_unknown_bands_never_shown() {
        let s = snapshot(SAMPLE);
        let standard = StandardRenderer::new(SymbolSet::Graphical).render(&s.document, &[Band::M20, Band::M40]);
        assert!(standard.contains("  20m"));
        assert!(!standard.contains("  10m"));
        assert!(!standard.contains("  40m"));
        assert!(!standard.contains("6m "));

        assert_eq!(CompactRenderer.render(&s.document, &Band::ALL), "10m:Fair(42)⬆25% | 20m:Good(61)");
        assert_eq!(CompactRenderer.render(&s.document, &[Band::M15]), "");
    }

    #[test]
    fn test_json_full_selection_round_trips() {
        let s = snapshot(SAMPLE);
        let out = JsonRenderer.render(&s, &Band::ALL).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, s.raw);
        assert!(out.contains("\n  \"updated\""));
        assert!(out.contains("\"6m\""));
    }

    #[test]
    fn test_json_subset_reduces_fields() {
        let s = snapshot(SAMPLE);
        let out = JsonRenderer.render(&s, &[Band::M10, Band::M15]).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();

        let keys: Vec<&String> = back.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["updated", "bands", "solar", "storm"]);
        let bands: Vec<&String> = back["bands"].as_object().unwrap().keys().collect();
        assert_eq!(bands, vec!["10m"]);
        assert_eq!(back["bands"]["10m"], s.raw["bands"]["10m"]);
        assert_eq!(back["solar"], s.raw["solar"]);
    }

    #[test]
    fn test_json_storm_key_presence_follows_input() {
        let with_null_storm = snapshot(r#"{"bands": {}, "storm": null}"#);
        let out = JsonRenderer.render(&with_null_storm, &[Band::M20]).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        assert!(back.as_object().unwrap().contains_key("storm"));
        assert_eq!(back["storm"], Value::Null);
        assert_eq!(back["updated"], Value::Null);
        assert_eq!(back["solar"], Value::Null);

        let without_storm = snapshot(r#"{"bands": {}}"#);
        let out = JsonRenderer.render(&without_storm, &[Band::M20]).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        assert!(!back.as_object().unwrap().contains_key("storm"));
    }

    #[test]
    fn test_json_does_not_short_circuit_on_error() {
        let s = snapshot(r#"{"error": "service unavailable", "extra": 1}"#);

        let full: Value = serde_json::from_str(&JsonRenderer.render(&s, &Band::ALL).unwrap()).unwrap();
        assert_eq!(full, json!({"error": "service unavailable", "extra": 1}));

        let reduced: Value = serde_json::from_str(&JsonRenderer.render(&s, &[Band::M10]).unwrap()).unwrap();
        assert_eq!(reduced, json!({"updated": null, "bands": {}, "solar": null}));
    }
}
