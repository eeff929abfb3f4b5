// Tue Jan 13 2026 - Alex

pub mod acquirer;
pub mod cursor;
pub mod error;
pub mod planner;
pub mod shodan;

pub use acquirer::ResultAcquirer;
pub use cursor::PageCursor;
pub use error::SearchError;
pub use planner::{PagePlan, HARD_PAGE_CAP, RESULTS_PER_PAGE};
pub use shodan::ShodanClient;

use std::fmt;
use std::net::Ipv6Addr;

/// A discovered stream address. Produced by the acquirer, consumed once by
/// the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// IPv6 hosts are bracketed so the port stays unambiguous.
    pub fn stream_url(&self) -> String {
        if self.address.parse::<Ipv6Addr>().is_ok() {
            format!("rtsp://[{}]:{}", self.address, self.port)
        } else {
            format!("rtsp://{}:{}", self.address, self.port)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub total: u64,
    pub matches: Vec<Endpoint>,
}

/// Remote search index. `search` pages are 1-based.
pub trait SearchApi {
    fn count(&self, query: &str) -> Result<u64, SearchError>;

    fn search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError>;

    fn query_credits(&self) -> Result<u64, SearchError>;

    /// Lazily walks every page of `query` until the index returns an empty
    /// page. A failed page is yielded once and ends the iteration.
    fn search_cursor<'a>(&'a self, query: &'a str) -> PageCursor<'a, Self>
    where
        Self: Sized,
    {
        PageCursor::new(self, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url() {
        assert_eq!(Endpoint::new("192.0.2.5", 554).stream_url(), "rtsp://192.0.2.5:554");
        assert_eq!(Endpoint::new("2001:db8::1", 554).stream_url(), "rtsp://[2001:db8::1]:554");
        assert_eq!(Endpoint::new("cam.example.net", 8554).stream_url(), "rtsp://cam.example.net:8554");
    }
}
