// Tue Jan 13 2026 - Alex

use super::{GeoDocument, GeoError, GeoLookup};
use serde_json::Value;
use std::time::Duration;

pub const GEO_TIMEOUT: Duration = Duration::from_secs(10);

const IP_API_URL: &str = "http://ip-api.com/json";
const IPGEOLOCATION_URL: &str = "https://api.ipgeolocation.io/ipgeo";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Provider {
    IpApi,
    IpGeolocation { api_key: String },
}

pub struct HttpGeoLookup {
    provider: Provider,
    http_client: reqwest::blocking::Client,
}

impl HttpGeoLookup {
    /// ip-api.com, keyed by address only.
    pub fn ip_api() -> Result<Self, GeoError> {
        Self::new(Provider::IpApi)
    }

    /// ipgeolocation.io, needs an API key.
    pub fn ipgeolocation(api_key: impl Into<String>) -> Result<Self, GeoError> {
        Self::new(Provider::IpGeolocation {
            api_key: api_key.into(),
        })
    }

    fn new(provider: Provider) -> Result<Self, GeoError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(GEO_TIMEOUT)
            .build()?;

        Ok(Self {
            provider,
            http_client,
        })
    }

    fn request(&self, address: &str) -> reqwest::blocking::RequestBuilder {
        match &self.provider {
            Provider::IpApi => self.http_client.get(format!("{}/{}", IP_API_URL, address)),
            Provider::IpGeolocation { api_key } => self
                .http_client
                .get(IPGEOLOCATION_URL)
                .query(&[("apiKey", api_key.as_str()), ("ip", address)]),
        }
    }
}

impl GeoLookup for HttpGeoLookup {
    // Error statuses still carry a JSON body; whatever fields it has are used.
    fn lookup(&self, address: &str) -> Result<GeoDocument, GeoError> {
        let value: Value = self.request(address).send()?.json()?;
        match value {
            Value::Object(document) => Ok(document),
            other => Err(GeoError::Malformed(format!("expected an object, got {}", other))),
        }
    }

    fn name(&self) -> &'static str {
        match self.provider {
            Provider::IpApi => "ip-api",
            Provider::IpGeolocation { .. } => "ipgeolocation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_urls() {
        let primary = HttpGeoLookup::ip_api().unwrap();
        let request = primary.request("192.0.2.1").build().unwrap();
        assert_eq!(request.url().as_str(), "http://ip-api.com/json/192.0.2.1");

        let secondary = HttpGeoLookup::ipgeolocation("abc123").unwrap();
        let request = secondary.request("192.0.2.1").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.ipgeolocation.io/ipgeo?apiKey=abc123&ip=192.0.2.1"
        );
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(HttpGeoLookup::ip_api().unwrap().name(), "ip-api");
        assert_eq!(HttpGeoLookup::ipgeolocation("k").unwrap().name(), "ipgeolocation");
    }
}
