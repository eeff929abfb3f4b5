// Tue Jan 13 2026 - Alex

use crate::geo::{GeoEnricher, GeoInfo};
use crate::process::command::recording_file;
use crate::process::{DrainOutcome, InterruptCoordinator, LaunchCommand, ProcessPool};
use crate::search::Endpoint;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const SPAWN_PAUSE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub launched: usize,
    pub failed: usize,
    pub outcome: RunOutcome,
}

pub fn launch_label(sequence: usize, endpoint: &Endpoint, geo: &GeoInfo) -> String {
    format!("[{}] {} ({})", sequence, endpoint, geo)
}

/// Feeds endpoints to the viewer pool one at a time, never exceeding the
/// pool's ceiling, then waits for the pool to drain.
pub struct Orchestrator {
    pool: Arc<ProcessPool>,
    interrupts: Arc<InterruptCoordinator>,
    geo: GeoEnricher,
    viewer: PathBuf,
    record: bool,
    poll_interval: Duration,
    spawn_pause: Duration,
}

impl Orchestrator {
    pub fn new(
        pool: Arc<ProcessPool>,
        interrupts: Arc<InterruptCoordinator>,
        geo: GeoEnricher,
        viewer: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pool,
            interrupts,
            geo,
            viewer: viewer.into(),
            record: false,
            poll_interval: POLL_INTERVAL,
            spawn_pause: SPAWN_PAUSE,
        }
    }

    pub fn with_recording(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_spawn_pause(mut self, pause: Duration) -> Self {
        self.spawn_pause = pause;
        self
    }

    pub fn run(&self, endpoints: &[Endpoint]) -> RunSummary {
        let mut summary = RunSummary {
            launched: 0,
            failed: 0,
            outcome: RunOutcome::Completed,
        };

        for (index, endpoint) in endpoints.iter().enumerate() {
            if !self.wait_for_slot() {
                summary.outcome = RunOutcome::Interrupted;
                return summary;
            }

            let sequence = index + 1;
            let command = self.build_command(sequence, endpoint);
            println!("{}", command.label);

            match self.pool.spawn(&command) {
                Ok(pid) => {
                    log::debug!("Launched {} as pid {}", endpoint, pid);
                    summary.launched += 1;
                }
                Err(e) => {
                    log::error!("{}", e);
                    summary.failed += 1;
                }
            }

            thread::sleep(self.spawn_pause);
        }

        if self.pool.await_drain(self.interrupts.flag(), self.poll_interval) == DrainOutcome::Interrupted {
            self.interrupts.trigger();
            summary.outcome = RunOutcome::Interrupted;
        }

        summary
    }

    fn build_command(&self, sequence: usize, endpoint: &Endpoint) -> LaunchCommand {
        let geo = self.geo.resolve(&endpoint.address);
        let label = launch_label(sequence, endpoint, &geo);
        let recording = self.record.then(|| recording_file(sequence));

        LaunchCommand::viewer(&self.viewer, &label, endpoint, recording)
    }

    /// Blocks until the pool has room. Returns false once interrupted.
    fn wait_for_slot(&self) -> bool {
        while self.interrupts.is_interrupted() || !self.pool.has_capacity() {
            log::debug!("{}", "Waiting for some process to finish...".dimmed());
            thread::sleep(self.poll_interval);

            if self.interrupts.is_interrupted() {
                self.interrupts.trigger();
                return false;
            }
        }

        true
    }
}
