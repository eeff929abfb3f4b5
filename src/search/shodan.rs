// Tue Jan 13 2026 - Alex

use super::{Endpoint, SearchApi, SearchError, SearchPage};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://api.shodan.io";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct CountResponse {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: u64,
    #[serde(default)]
    matches: Vec<MatchRecord>,
}

#[derive(Debug, Deserialize)]
struct MatchRecord {
    ip_str: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    query_credits: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct ShodanClient {
    api_key: String,
    api_base_url: String,
    http_client: reqwest::blocking::Client,
}

impl ShodanClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, api_base_url: impl Into<String>) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::InvalidInput("API key must not be empty".to_string()));
        }

        let http_client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            api_key,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, SearchError> {
        let url = format!("{}{}", self.api_base_url, path);
        log::trace!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        parse_body(status.as_u16(), &body)
    }
}

fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, SearchError> {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(SearchError::Api(error.error));
    }

    if !(200..300).contains(&status) {
        return Err(SearchError::Api(format!("HTTP status {}", status)));
    }

    serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))
}

impl SearchApi for ShodanClient {
    fn count(&self, query: &str) -> Result<u64, SearchError> {
        let response: CountResponse = self.get("/shodan/host/count", &[("query", query.to_string())])?;
        Ok(response.total)
    }

    fn search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        let response: SearchResponse = self.get(
            "/shodan/host/search",
            &[("query", query.to_string()), ("page", page.to_string())],
        )?;
        Ok(response.into())
    }

    fn query_credits(&self) -> Result<u64, SearchError> {
        let response: InfoResponse = self.get("/api-info", &[])?;
        Ok(response.query_credits)
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            total: response.total,
            matches: response
                .matches
                .into_iter()
                .map(|m| Endpoint::new(m.ip_str, m.port))
                .collect(),
        }
    }
}
