// Tue Jan 13 2026 - Alex

use super::{ProcessError, ProcessPool};
use crate::config::RC_SIGINT;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set once on the first interrupt, never cleared.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns whether the flag was already set.
    pub fn set(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }
}

pub type ExitHook = Box<dyn Fn(i32) + Send + Sync>;

pub struct InterruptCoordinator {
    flag: InterruptFlag,
    pool: Arc<ProcessPool>,
    exit_hook: ExitHook,
}

impl InterruptCoordinator {
    pub fn new(pool: Arc<ProcessPool>) -> Self {
        Self {
            flag: InterruptFlag::new(),
            pool,
            exit_hook: Box::new(|code| {
                std::process::exit(code);
            }),
        }
    }

    pub fn with_exit_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_hook = Box::new(hook);
        self
    }

    pub fn flag(&self) -> &InterruptFlag {
        &self.flag
    }

    pub fn is_interrupted(&self) -> bool {
        self.flag.is_set()
    }

    /// Kills every tracked child and ends the program with `RC_SIGINT`.
    /// Calling it again only repeats the kill and the exit.
    pub fn trigger(&self) {
        if !self.flag.set() {
            log::debug!("Interrupt received");
        }

        println!("\n{} Killing active processes...", "[!]".yellow());
        let killed = self.pool.kill_all();
        log::debug!("Killed {} processes", killed);

        (self.exit_hook)(RC_SIGINT);
    }

    /// Routes Ctrl-C to `trigger`. ctrlc runs the handler on its own thread,
    /// so taking the pool lock there is fine.
    pub fn install(self: &Arc<Self>) -> Result<(), ProcessError> {
        let coordinator = Arc::clone(self);
        ctrlc::set_handler(move || coordinator.trigger())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fakes::FakeOs;
    use crate::process::LaunchCommand;
    use parking_lot::Mutex;

    fn recording_coordinator(pool: Arc<ProcessPool>) -> (InterruptCoordinator, Arc<Mutex<Vec<i32>>>) {
        let exits = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&exits);
        let coordinator = InterruptCoordinator::new(pool).with_exit_hook(move |code| recorded.lock().push(code));
        (coordinator, exits)
    }

    #[test]
    fn test_trigger_kills_every_tracked_process() {
        let os = FakeOs::new();
        let pool = Arc::new(
            ProcessPool::new("mpv", 10)
                .with_inspector(os.inspector())
                .with_spawner(os.spawner()),
        );
        for n in 0..4 {
            pool.spawn(&LaunchCommand::new("mpv").with_label(n.to_string())).unwrap();
        }

        let (coordinator, exits) = recording_coordinator(Arc::clone(&pool));
        assert!(!coordinator.is_interrupted());

        coordinator.trigger();
        assert!(coordinator.is_interrupted());
        assert_eq!(os.kills(), 4);
        assert_eq!(pool.tracked_count(), 0);
        assert_eq!(*exits.lock(), vec![RC_SIGINT]);

        coordinator.trigger();
        assert_eq!(os.kills(), 4);
        assert_eq!(pool.tracked_count(), 0);
        assert_eq!(*exits.lock(), vec![RC_SIGINT, RC_SIGINT]);
    }

    #[test]
    fn test_flag_set_once() {
        let flag = InterruptFlag::new();
        let shared = flag.clone();

        assert!(!flag.is_set());
        assert!(!shared.set());
        assert!(flag.is_set());
        assert!(shared.set());
    }
}
