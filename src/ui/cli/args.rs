// Wed Jan 15 2026 - Alex

use crate::config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_MAX_PROCESSES, DEFAULT_PAGES, DEFAULT_QUERY};
use crate::process::CountScope;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "camfeed")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "RTSP stream manager using Shodan", long_about = None)]
pub struct Args {
    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Query to be launched in Shodan
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Extend the query with additional parameters
    #[arg(short = 'x', long, default_value = "")]
    pub extend: String,

    /// Choose pages randomly instead of sequentially
    #[arg(short, long)]
    pub random_pages: bool,

    /// Number of pages that will be retrieved from Shodan
    #[arg(short, long, default_value_t = DEFAULT_PAGES)]
    pub pages: u32,

    /// Request every result from Shodan instead of a page budget
    #[arg(short, long)]
    pub total_results: bool,

    /// Record the streams in mkv files
    #[arg(short, long)]
    pub stream_record: bool,

    /// Max parallel processes
    #[arg(short, long, default_value_t = DEFAULT_MAX_PROCESSES)]
    pub max_processes: usize,

    /// Only count viewers started by this run against the limit
    #[arg(long)]
    pub own_processes_only: bool,

    /// Verbose outputs
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long)]
    pub no_banner: bool,
}

impl Args {
    pub fn to_config(&self) -> Config {
        let mut config = Config::new()
            .with_config_file(self.config.clone())
            .with_query(&self.query, &self.extend);

        config.pages = self.pages;
        config.random_pages = self.random_pages;
        config.total_results = self.total_results;
        config.stream_record = self.stream_record;
        config.max_processes = self.max_processes;
        config.verbose = self.verbose;
        config.count_scope = if self.own_processes_only {
            CountScope::Tracked
        } else {
            CountScope::System
        };
        config
    }
}
