// Tue Jan 13 2026 - Alex

use super::{GeoDocument, GeoInfo, GeoLookup};

/// Best-effort address enrichment. Never fails; unknown fields come back as
/// placeholders.
pub struct GeoEnricher {
    primary: Box<dyn GeoLookup>,
    secondary: Option<Box<dyn GeoLookup>>,
}

impl GeoEnricher {
    pub fn new(primary: Box<dyn GeoLookup>) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Box<dyn GeoLookup>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn resolve(&self, address: &str) -> GeoInfo {
        let document = match self.primary.lookup(address) {
            Ok(document) => document,
            Err(e) => {
                log::debug!("{} lookup failed for {}: {}", self.primary.name(), address, e);
                self.secondary_lookup(address)
            }
        };

        GeoInfo::from_document(&document)
    }

    fn secondary_lookup(&self, address: &str) -> GeoDocument {
        let Some(secondary) = &self.secondary else {
            return GeoDocument::new();
        };

        secondary.lookup(address).unwrap_or_else(|e| {
            log::debug!("{} lookup failed for {}: {}", secondary.name(), address, e);
            GeoDocument::new()
        })
    }
}
