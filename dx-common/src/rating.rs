///! Rating scale for band conditions
///!
///! Five ordered levels, each with a graphical glyph and an ASCII fallback
///! for terminals without emoji support.

use serde::{Deserialize, Serialize};

/// Qualitative propagation level, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Which symbol table to draw rating glyphs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolSet {
    #[default]
    Graphical,
    Ascii,
}

/// Placeholder shown for ratings outside the scale
pub const UNKNOWN_SYMBOL: &str = "?";

// Indexed by `Rating as usize`.
const RATING_NAMES: [&str; 5] = ["VeryPoor", "Poor", "Fair", "Good", "Excellent"];
const GRAPHICAL_SYMBOLS: [&str; 5] = ["⚫", "🔴", "🟠", "🟢", "🔵"];
const ASCII_SYMBOLS: [&str; 5] = ["[    ]", "[+   ]", "[++  ]", "[+++ ]", "[++++]"];

impl Rating {
    /// The scale, lowest first
    pub const SCALE: [Rating; 5] = [
        Rating::VeryPoor,
        Rating::Poor,
        Rating::Fair,
        Rating::Good,
        Rating::Excellent,
    ];

    /// Position in the scale (VeryPoor = 0)
    pub fn level(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        RATING_NAMES[self.level()]
    }

    pub fn symbol(&self, set: SymbolSet) -> &'static str {
        match set {
            SymbolSet::Graphical => GRAPHICAL_SYMBOLS[self.level()],
            SymbolSet::Ascii => ASCII_SYMBOLS[self.level()],
        }
    }

    /// Exact, case-sensitive lookup by name
    pub fn from_name(name: &str) -> Option<Rating> {
        Rating::SCALE.into_iter().find(|r| r.as_str() == name)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rating field as received from the service.
///
/// Resolved once while decoding so renderers and the alert check share a
/// single fallback path for unknown or missing values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RatingLabel {
    Known(Rating),
    /// Any value that is not one of the five scale names
    Other(String),
    #[default]
    Missing,
}

impl RatingLabel {
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => RatingLabel::Missing,
            Some(serde_json::Value::String(s)) => match Rating::from_name(s) {
                Some(rating) => RatingLabel::Known(rating),
                None => RatingLabel::Other(s.clone()),
            },
            Some(other) => RatingLabel::Other(other.to_string()),
        }
    }

    /// Text shown in reports
    pub fn display_name(&self) -> &str {
        match self {
            RatingLabel::Known(rating) => rating.as_str(),
            RatingLabel::Other(s) => s,
            RatingLabel::Missing => UNKNOWN_SYMBOL,
        }
    }

    pub fn symbol(&self, set: SymbolSet) -> &'static str {
        match self {
            RatingLabel::Known(rating) => rating.symbol(set),
            _ => UNKNOWN_SYMBOL,
        }
    }

    /// Rating used for threshold comparison. A missing rating counts as
    /// VeryPoor; unknown names are incomparable.
    pub fn comparable(&self) -> Option<Rating> {
        match self {
            RatingLabel::Known(rating) => Some(*rating),
            RatingLabel::Missing => Some(Rating::VeryPoor),
            RatingLabel::Other(_) => None,
        }
    }
}
