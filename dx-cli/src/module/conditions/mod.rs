///! DX index conditions
///!
///! Fetches the conditions document over HTTP and decodes it into a
///! snapshot holding both the raw JSON and the typed view.

pub mod error;
pub mod fetcher;
pub mod parser;
pub mod types;

pub use error::FetchError;
pub use fetcher::ConditionsFetcher;
pub use parser::parse_conditions_json;
pub use types::ConditionsSnapshot;
