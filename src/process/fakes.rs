// Tue Jan 13 2026 - Alex

use super::{display_name, ChildHandle, LaunchCommand, ProcessEntry, ProcessInspector, Spawner};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeState {
    Running,
    Zombie,
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    Spawned(u32),
    Exited(u32),
    Killed(u32),
}

#[derive(Default)]
struct FakeOsState {
    next_pid: u32,
    processes: BTreeMap<u32, (String, FakeState)>,
    events: Vec<FakeEvent>,
    kills: usize,
    fail_spawns: bool,
}

/// In-memory process table shared by the fake inspector, spawner and
/// children.
#[derive(Default)]
pub struct FakeOs {
    state: Mutex<FakeOsState>,
}

impl FakeOs {
    pub fn new() -> Arc<Self> {
        let os = Self::default();
        os.state.lock().next_pid = 1000;
        Arc::new(os)
    }

    pub fn inspector(self: &Arc<Self>) -> Box<dyn ProcessInspector> {
        Box::new(FakeInspector(Arc::clone(self)))
    }

    pub fn spawner(self: &Arc<Self>) -> Box<dyn Spawner> {
        Box::new(FakeSpawner(Arc::clone(self)))
    }

    /// A process this pool did not start.
    pub fn add_foreign(&self, name: &str) -> u32 {
        let mut state = self.state.lock();
        let pid = state.next_pid;
        state.next_pid += 1;
        state.processes.insert(pid, (name.to_string(), FakeState::Running));
        pid
    }

    pub fn exit(&self, pid: u32) {
        let mut state = self.state.lock();
        if let Some(entry) = state.processes.get_mut(&pid) {
            if entry.1 == FakeState::Running {
                entry.1 = FakeState::Zombie;
                state.events.push(FakeEvent::Exited(pid));
            }
        }
    }

    /// Changes the name the inspector reports, e.g. a truncated one.
    pub fn rename(&self, pid: u32, name: &str) {
        if let Some(entry) = self.state.lock().processes.get_mut(&pid) {
            entry.0 = name.to_string();
        }
    }

    pub fn set_fail_spawns(&self, fail: bool) {
        self.state.lock().fail_spawns = fail;
    }

    pub fn state_of(&self, pid: u32) -> Option<FakeState> {
        self.state.lock().processes.get(&pid).map(|entry| entry.1)
    }

    pub fn kills(&self) -> usize {
        self.state.lock().kills
    }

    pub fn events(&self) -> Vec<FakeEvent> {
        self.state.lock().events.clone()
    }

    pub fn spawned(&self) -> Vec<u32> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                FakeEvent::Spawned(pid) => Some(*pid),
                _ => None,
            })
            .collect()
    }

    pub fn running(&self) -> Vec<u32> {
        self.state
            .lock()
            .processes
            .iter()
            .filter(|(_, entry)| entry.1 == FakeState::Running)
            .map(|(pid, _)| *pid)
            .collect()
    }
}

struct FakeInspector(Arc<FakeOs>);

impl ProcessInspector for FakeInspector {
    fn snapshot(&self) -> Vec<ProcessEntry> {
        self.0
            .state
            .lock()
            .processes
            .iter()
            .filter(|(_, entry)| entry.1 != FakeState::Gone)
            .map(|(pid, entry)| ProcessEntry {
                pid: *pid,
                name: entry.0.clone(),
                zombie: entry.1 == FakeState::Zombie,
            })
            .collect()
    }
}

struct FakeSpawner(Arc<FakeOs>);

impl Spawner for FakeSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<Box<dyn ChildHandle>> {
        let mut state = self.0.state.lock();
        if state.fail_spawns {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file or directory"));
        }

        let pid = state.next_pid;
        state.next_pid += 1;
        state
            .processes
            .insert(pid, (display_name(&command.program), FakeState::Running));
        state.events.push(FakeEvent::Spawned(pid));

        Ok(Box::new(FakeChild {
            os: Arc::clone(&self.0),
            pid,
        }))
    }
}

struct FakeChild {
    os: Arc<FakeOs>,
    pid: u32,
}

impl ChildHandle for FakeChild {
    fn id(&self) -> u32 {
        self.pid
    }

    fn kill(&mut self) -> io::Result<()> {
        let mut state = self.os.state.lock();
        state.kills += 1;
        state.events.push(FakeEvent::Killed(self.pid));
        if let Some(entry) = state.processes.get_mut(&self.pid) {
            entry.1 = FakeState::Gone;
        }
        Ok(())
    }

    fn reap(&mut self) -> io::Result<()> {
        Ok(())
    }
}
