// Tue Jan 13 2026 - Alex

use crate::process::CountScope;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_QUERY: &str = "RTSP has_screenshot:yes";
pub const DEFAULT_PAGES: u32 = 1;
pub const DEFAULT_MAX_PROCESSES: usize = 10;

pub const RC_SIGINT: i32 = 1;
pub const RC_WRONG_CONFIG: i32 = 2;
pub const RC_SEARCH_FAILED: i32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub config_file: PathBuf,
    pub query: String,
    pub pages: u32,
    pub random_pages: bool,
    pub total_results: bool,
    pub stream_record: bool,
    pub max_processes: usize,
    pub verbose: bool,
    pub count_scope: CountScope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            query: DEFAULT_QUERY.to_string(),
            pages: DEFAULT_PAGES,
            random_pages: false,
            total_results: false,
            stream_record: false,
            max_processes: DEFAULT_MAX_PROCESSES,
            verbose: false,
            count_scope: CountScope::System,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: &str, extend: &str) -> Self {
        self.query = build_query(query, extend);
        self
    }

    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = path;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.query.is_empty() {
            return Err("query must not be empty".to_string());
        }
        if self.max_processes == 0 {
            return Err("max_processes must be greater than 0".to_string());
        }
        if !self.total_results && self.pages == 0 {
            return Err("pages must be greater than 0".to_string());
        }
        Ok(())
    }
}

pub fn build_query(query: &str, extend: &str) -> String {
    format!("{} {}", query, extend).trim().to_string()
}
