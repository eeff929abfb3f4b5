// Tue Jan 13 2026 - Alex

use anyhow::Context;
use camfeed::{
    config::{Config, RC_SEARCH_FAILED, RC_SIGINT, RC_WRONG_CONFIG},
    geo::{GeoEnricher, HttpGeoLookup},
    orchestration::{Orchestrator, RunOutcome},
    process::{display_name, InterruptCoordinator, ProcessPool},
    search::{Endpoint, ResultAcquirer, SearchApi, ShodanClient},
    ui::{self, cli, Banner, ProgressManager},
    utils::{
        config::{load_credentials, Credentials},
        format_duration,
        logging::{self, scoped_timer},
        pluralize,
    },
};
use std::sync::Arc;
use std::time::Instant;

fn main() {
    let args = cli::parse_args();
    let config = args.to_config();

    logging::init_logger(config.verbose);

    if !args.no_banner {
        Banner::default().print();
    }

    if let Err(e) = config.validate() {
        ui::failure(&format!("Config: {}", e));
        std::process::exit(RC_WRONG_CONFIG);
    }

    let credentials = match load_credentials(&config.config_file) {
        Ok((credentials, unknown)) => {
            for entry in unknown {
                log::warn!("Config: {}", entry);
            }
            credentials
        }
        Err(e) => {
            ui::failure(&format!("Config: {}", e));
            std::process::exit(RC_WRONG_CONFIG);
        }
    };

    let code = match run(&config, credentials) {
        Ok(code) => code,
        Err(e) => {
            ui::failure(&format!("{:#}", e));
            RC_WRONG_CONFIG
        }
    };

    std::process::exit(code);
}

fn run(config: &Config, credentials: Credentials) -> anyhow::Result<i32> {
    let start_time = Instant::now();

    let viewer_name = display_name(&credentials.mpv_file_path);
    let pool = Arc::new(ProcessPool::new(viewer_name, config.max_processes).with_scope(config.count_scope));
    let interrupts = Arc::new(InterruptCoordinator::new(Arc::clone(&pool)));
    interrupts.install().context("Failed to install Ctrl-C handler")?;

    let api = ShodanClient::new(credentials.shodan_api_key.as_str()).context("Failed to create Shodan client")?;
    match api.query_credits() {
        Ok(credits) => ui::success(&format!("Credits: {}", credits)),
        Err(e) => log::warn!("Could not read account info: {}", e),
    }

    ui::status(&format!("Launching query: {}", config.query));
    let endpoints = match acquire(config, api) {
        Some(endpoints) => endpoints,
        None => {
            ui::failure("Error. Exiting...");
            return Ok(RC_SEARCH_FAILED);
        }
    };

    if endpoints.is_empty() {
        return Ok(0);
    }

    let mut geo = GeoEnricher::new(Box::new(HttpGeoLookup::ip_api()?));
    if let Some(key) = &credentials.ipgeo_api_key {
        geo = geo.with_secondary(Box::new(HttpGeoLookup::ipgeolocation(key.as_str())?));
    }

    let orchestrator = Orchestrator::new(pool, interrupts, geo, credentials.mpv_file_path)
        .with_recording(config.stream_record);
    let summary = orchestrator.run(&endpoints);

    if summary.outcome == RunOutcome::Interrupted {
        return Ok(RC_SIGINT);
    }

    ui::success(&format!(
        "Finished {} in {}",
        pluralize(summary.launched, "stream", "streams"),
        format_duration(start_time.elapsed())
    ));
    if summary.failed > 0 {
        ui::failure(&format!("{} could not be launched", pluralize(summary.failed, "stream", "streams")));
    }

    Ok(0)
}

fn acquire(config: &Config, api: ShodanClient) -> Option<Vec<Endpoint>> {
    let _timer = scoped_timer("query");
    let progress = ProgressManager::new();

    if config.total_results {
        let acquirer = ResultAcquirer::new(api).with_progress(progress.create_spinner("Fetching all results"));
        let endpoints = acquirer.fetch_all(&config.query);
        ui::success(&format!("{} results retrieved.", endpoints.len()));
        return Some(endpoints);
    }

    let acquirer = ResultAcquirer::new(api)
        .with_randomize(config.random_pages)
        .with_progress(progress.create_bar("Fetching pages"));

    match acquirer.fetch_bounded(&config.query, config.pages) {
        Ok((total, endpoints)) => {
            ui::success(&format!("The query returns {} matches in Shodan.", total));
            ui::success(&format!("Working with {}.", endpoints.len()));
            Some(endpoints)
        }
        Err(e) => {
            ui::failure(&format!("Error: {}", e));
            None
        }
    }
}
