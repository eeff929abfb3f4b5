// Tue Jan 13 2026 - Alex

pub mod config;
pub mod geo;
pub mod orchestration;
pub mod process;
pub mod search;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use geo::GeoEnricher;
pub use orchestration::Orchestrator;
pub use process::{InterruptCoordinator, ProcessPool};
pub use search::{Endpoint, ResultAcquirer, ShodanClient};
