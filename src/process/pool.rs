// Tue Jan 13 2026 - Alex

use super::{
    ChildHandle, InterruptFlag, LaunchCommand, OsSpawner, ProcessError, ProcessInspector, Spawner,
    SysinfoInspector,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Which processes count against the concurrency ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountScope {
    /// Every live process with the viewer's name, ours or not.
    #[default]
    System,
    /// Only the children this pool launched.
    Tracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    Drained,
    Interrupted,
}

pub struct TrackedProcess {
    pub pid: u32,
    pub label: String,
    pub recording: bool,
    handle: Box<dyn ChildHandle>,
}

impl TrackedProcess {
    fn terminate(&mut self) {
        if let Err(e) = self.handle.kill() {
            log::debug!("Kill failed for {} ({}): {}", self.pid, self.label, e);
        }
        if let Err(e) = self.handle.reap() {
            log::debug!("Reap failed for {} ({}): {}", self.pid, self.label, e);
        }
    }
}

pub struct ProcessPool {
    processes: Mutex<HashMap<u32, TrackedProcess>>,
    max_processes: usize,
    process_name: String,
    scope: CountScope,
    inspector: Box<dyn ProcessInspector>,
    spawner: Box<dyn Spawner>,
}

impl ProcessPool {
    pub fn new(process_name: impl Into<String>, max_processes: usize) -> Self {
        Self {
            processes: Mutex::new(HashMap::new()),
            max_processes,
            process_name: process_name.into(),
            scope: CountScope::default(),
            inspector: Box::new(SysinfoInspector::new()),
            spawner: Box::new(OsSpawner),
        }
    }

    pub fn with_scope(mut self, scope: CountScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_inspector(mut self, inspector: Box<dyn ProcessInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn with_spawner(mut self, spawner: Box<dyn Spawner>) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn spawn(&self, command: &LaunchCommand) -> Result<u32, ProcessError> {
        let handle = self.spawner.spawn(command).map_err(|source| ProcessError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let pid = handle.id();
        let process = TrackedProcess {
            pid,
            label: command.label.clone(),
            recording: command.is_recording(),
            handle,
        };

        self.processes.lock().insert(pid, process);
        log::debug!("Registered {} ({})", pid, command.label);
        Ok(pid)
    }

    /// Counts live viewer processes. Tracked children are matched by pid,
    /// whatever name the OS reports for them; others by viewer name. Tracked
    /// entries that turned into zombies are reaped and dropped on the way.
    pub fn active_count(&self) -> usize {
        let snapshot = self.inspector.snapshot();
        let mut processes = self.processes.lock();
        let mut count = 0;

        for entry in &snapshot {
            let tracked = processes.contains_key(&entry.pid);
            if !tracked && entry.name != self.process_name {
                continue;
            }

            if entry.zombie {
                if let Some(mut process) = processes.remove(&entry.pid) {
                    log::debug!("Reaping finished process {} ({})", process.pid, process.label);
                    process.terminate();
                }
                continue;
            }

            if tracked || self.scope == CountScope::System {
                count += 1;
            }
        }

        count
    }

    pub fn has_capacity(&self) -> bool {
        self.active_count() < self.max_processes
    }

    /// Force-kills every tracked child. Safe to call on an empty pool.
    pub fn kill_all(&self) -> usize {
        let mut processes = self.processes.lock();
        let killed = processes.len();

        for (_, mut process) in processes.drain() {
            log::debug!("Killing {} ({})", process.pid, process.label);
            process.terminate();
        }

        killed
    }

    pub fn await_drain(&self, interrupted: &InterruptFlag, interval: Duration) -> DrainOutcome {
        loop {
            if interrupted.is_set() {
                return DrainOutcome::Interrupted;
            }
            if self.active_count() == 0 {
                return DrainOutcome::Drained;
            }
            thread::sleep(interval);
        }
    }

    pub fn tracked_count(&self) -> usize {
        self.processes.lock().len()
    }

    pub fn tracked_pids(&self) -> Vec<u32> {
        let mut pids: Vec<u32> = self.processes.lock().keys().copied().collect();
        pids.sort_unstable();
        pids
    }

    pub fn recording_count(&self) -> usize {
        self.processes.lock().values().filter(|p| p.recording).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fakes::{FakeOs, FakeState};
    use std::sync::Arc;

    fn pool(os: &Arc<FakeOs>, max: usize) -> ProcessPool {
        ProcessPool::new("mpv", max)
            .with_inspector(os.inspector())
            .with_spawner(os.spawner())
    }

    fn command(n: usize) -> LaunchCommand {
        LaunchCommand::new("/usr/bin/mpv").with_label(format!("[{}]", n))
    }

    #[test]
    fn test_active_count_matches_spawned() {
        let os = FakeOs::new();
        let pool = pool(&os, 3);

        for n in 1..=3 {
            assert!(pool.has_capacity());
            pool.spawn(&command(n)).unwrap();
            assert_eq!(pool.active_count(), n);
        }

        assert!(!pool.has_capacity());
        assert_eq!(pool.tracked_count(), 3);
    }

    #[test]
    fn test_zombie_is_reaped_by_next_count() {
        let os = FakeOs::new();
        let pool = pool(&os, 4);
        let first = pool.spawn(&command(1)).unwrap();
        pool.spawn(&command(2)).unwrap();

        os.exit(first);

        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.tracked_pids().len(), 1);
        assert!(!pool.tracked_pids().contains(&first));
        assert_eq!(os.state_of(first), Some(FakeState::Gone));
    }

    #[test]
    fn test_foreign_processes_counted_in_system_scope() {
        let os = FakeOs::new();
        let foreign = os.add_foreign("mpv");
        os.add_foreign("vlc");
        let pool = pool(&os, 2);
        pool.spawn(&command(1)).unwrap();

        assert_eq!(pool.active_count(), 2);
        assert!(!pool.has_capacity());

        os.exit(foreign);
        assert_eq!(pool.active_count(), 1);
        // Untracked zombies are left alone.
        assert_eq!(os.state_of(foreign), Some(FakeState::Zombie));
    }

    #[test]
    fn test_tracked_child_matched_by_pid_under_short_name() {
        let os = FakeOs::new();
        let pool = ProcessPool::new("mpv-viewer-long-binary", 1)
            .with_inspector(os.inspector())
            .with_spawner(os.spawner());
        let pid = pool
            .spawn(&LaunchCommand::new("/opt/mpv/mpv-viewer-long-binary").with_label("[1]"))
            .unwrap();
        os.rename(pid, "mpv-viewer-long");
        os.add_foreign("mpv-viewer-long");

        assert_eq!(pool.active_count(), 1);
        assert!(!pool.has_capacity());

        os.exit(pid);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.tracked_count(), 0);
        assert_eq!(os.state_of(pid), Some(FakeState::Gone));
    }

    #[test]
    fn test_tracked_scope_ignores_foreign() {
        let os = FakeOs::new();
        os.add_foreign("mpv");
        let pool = pool(&os, 2).with_scope(CountScope::Tracked);
        pool.spawn(&command(1)).unwrap();

        assert_eq!(pool.active_count(), 1);
        assert!(pool.has_capacity());
    }

    #[test]
    fn test_kill_all_is_idempotent() {
        let os = FakeOs::new();
        let pool = pool(&os, 5);
        for n in 1..=3 {
            pool.spawn(&command(n)).unwrap();
        }

        assert_eq!(pool.kill_all(), 3);
        assert_eq!(os.kills(), 3);
        assert_eq!(pool.tracked_count(), 0);

        assert_eq!(pool.kill_all(), 0);
        assert_eq!(os.kills(), 3);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_spawn_failure_is_not_registered() {
        let os = FakeOs::new();
        os.set_fail_spawns(true);
        let pool = pool(&os, 2);

        let result = pool.spawn(&command(1));
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
        assert_eq!(pool.tracked_count(), 0);
    }

    #[test]
    fn test_recording_flag_tracked() {
        let os = FakeOs::new();
        let pool = pool(&os, 2);
        let mut recording = command(1);
        recording.recording = Some("1.mkv".into());

        pool.spawn(&recording).unwrap();
        pool.spawn(&command(2)).unwrap();
        assert_eq!(pool.recording_count(), 1);
    }

    #[test]
    fn test_await_drain() {
        let os = FakeOs::new();
        let pool = Arc::new(pool(&os, 2));
        let pid = pool.spawn(&command(1)).unwrap();
        let flag = InterruptFlag::new();

        let finisher = {
            let os = Arc::clone(&os);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                os.exit(pid);
            })
        };

        assert_eq!(pool.await_drain(&flag, Duration::from_millis(5)), DrainOutcome::Drained);
        finisher.join().unwrap();
        assert_eq!(pool.tracked_count(), 0);
    }

    #[test]
    fn test_await_drain_observes_interrupt() {
        let os = FakeOs::new();
        let pool = pool(&os, 2);
        pool.spawn(&command(1)).unwrap();
        let flag = InterruptFlag::new();
        flag.set();

        assert_eq!(pool.await_drain(&flag, Duration::from_millis(5)), DrainOutcome::Interrupted);
    }

    #[cfg(unix)]
    #[test]
    fn test_os_spawner_kill_all() {
        let os = FakeOs::new();
        let pool = ProcessPool::new("sleep", 1).with_inspector(os.inspector());
        let command = LaunchCommand::new("sleep").arg("30").with_label("sleeper");

        let pid = pool.spawn(&command).unwrap();
        assert_eq!(pool.tracked_pids(), vec![pid]);
        assert_eq!(pool.kill_all(), 1);
        assert_eq!(pool.tracked_count(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_long_viewer_name_counted_and_reaped() {
        use crate::process::display_name;
        use std::path::Path;

        let Some(sleep) = ["/bin/sleep", "/usr/bin/sleep"].into_iter().map(Path::new).find(|p| p.exists()) else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let viewer = dir.path().join("camfeed-long-viewer-binary");
        std::os::unix::fs::symlink(sleep, &viewer).unwrap();

        let pool = ProcessPool::new(display_name(&viewer), 2);
        let pid = pool
            .spawn(&LaunchCommand::new(&viewer).arg("0.3").with_label("long"))
            .unwrap();

        let entry = SysinfoInspector::new().snapshot().into_iter().find(|entry| entry.pid == pid);
        assert_eq!(entry.map(|entry| entry.name), Some("camfeed-long-viewer-binary".to_string()));
        assert_eq!(pool.active_count(), 1);

        thread::sleep(Duration::from_millis(800));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.tracked_count(), 0);
    }
}
