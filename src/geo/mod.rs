// Tue Jan 13 2026 - Alex

pub mod enricher;
pub mod error;
pub mod provider;

pub use enricher::GeoEnricher;
pub use error::GeoError;
pub use provider::{HttpGeoLookup, GEO_TIMEOUT};

use serde_json::{Map, Value};
use std::fmt;

pub const PLACEHOLDER: &str = "-";

pub type GeoDocument = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoInfo {
    pub country: String,
    pub region: String,
    pub city: String,
}

impl GeoInfo {
    pub fn unknown() -> Self {
        Self {
            country: PLACEHOLDER.to_string(),
            region: PLACEHOLDER.to_string(),
            city: PLACEHOLDER.to_string(),
        }
    }

    /// The two providers name their fields differently; the first key that
    /// holds a string wins.
    pub fn from_document(document: &GeoDocument) -> Self {
        Self {
            country: field(document, &["country", "country_name"]),
            region: field(document, &["regionName", "state_prov"]),
            city: field(document, &["city"]),
        }
    }
}

fn field(document: &GeoDocument, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| document.get(*key).and_then(Value::as_str))
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

impl fmt::Display for GeoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.country, self.region, self.city)
    }
}

pub trait GeoLookup: Send + Sync {
    fn lookup(&self, address: &str) -> Result<GeoDocument, GeoError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
