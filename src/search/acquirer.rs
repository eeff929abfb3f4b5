// Tue Jan 13 2026 - Alex

use super::planner::{self, RESULTS_PER_PAGE};
use super::{Endpoint, SearchApi, SearchError};
use indicatif::ProgressBar;

pub struct ResultAcquirer<A: SearchApi> {
    api: A,
    randomize: bool,
    progress: ProgressBar,
}

impl<A: SearchApi> ResultAcquirer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            randomize: false,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches at most `page_budget` pages. Any failure discards the pages
    /// already fetched.
    pub fn fetch_bounded(&self, query: &str, page_budget: u32) -> Result<(u64, Vec<Endpoint>), SearchError> {
        let total = self.api.count(query)?;
        let mut plan = planner::plan(total, RESULTS_PER_PAGE, self.randomize);
        let to_fetch = (page_budget as u64)
            .min(planner::total_pages(total, RESULTS_PER_PAGE))
            .min(plan.len() as u64);

        log::debug!("{} matches, fetching {} of {} planned pages", total, to_fetch, plan.len());
        self.progress.set_length(to_fetch);

        let mut reported = total;
        let mut endpoints = Vec::new();

        for _ in 0..to_fetch {
            let Some(page) = plan.pop_next() else {
                break;
            };

            self.progress.set_message(format!("page {}", page));
            let result = match self.api.search(query, page) {
                Ok(result) => result,
                Err(e) => {
                    self.progress.abandon();
                    return Err(e);
                }
            };

            log::debug!("Page {} returned {} matches", page, result.matches.len());
            reported = result.total;
            endpoints.extend(result.matches);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok((reported, endpoints))
    }

    /// Walks the cursor to the end. A mid-stream failure keeps what was
    /// gathered before it.
    pub fn fetch_all(&self, query: &str) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();

        for item in self.api.search_cursor(query) {
            match item {
                Ok(endpoint) => {
                    endpoints.push(endpoint);
                    self.progress.set_message(format!("{} results", endpoints.len()));
                }
                Err(e) => {
                    log::error!("Search stopped after {} results: {}", endpoints.len(), e);
                    break;
                }
            }
        }

        self.progress.finish_and_clear();
        endpoints
    }
}
