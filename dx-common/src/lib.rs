pub mod band;
pub mod lenient;
pub mod rating;
pub mod types;

pub use band::{Band, BandError, is_full_selection, select_bands};
pub use rating::{Rating, RatingLabel, SymbolSet};
pub use types::{BandReading, ConditionsDocument, SolarData, StormForecast};
