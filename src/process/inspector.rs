// Tue Jan 13 2026 - Alex

use parking_lot::Mutex;
use std::path::Path;
use sysinfo::{Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub zombie: bool,
}

/// OS-wide process listing.
pub trait ProcessInspector: Send + Sync {
    fn snapshot(&self) -> Vec<ProcessEntry>;
}

pub struct SysinfoInspector {
    system: Mutex<System>,
}

impl SysinfoInspector {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInspector for SysinfoInspector {
    fn snapshot(&self) -> Vec<ProcessEntry> {
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_exe(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        system
            .processes()
            .iter()
            // Linux lists threads as tasks; only whole processes count.
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| ProcessEntry {
                pid: pid.as_u32(),
                name: process_name(process),
                zombie: process.status() == ProcessStatus::Zombie,
            })
            .collect()
    }
}

/// Linux keeps only the first 15 bytes of a process name. When the short
/// name is cut, the full one is taken from argv[0] or the executable path,
/// provided it extends the short name.
const SHORT_NAME_LEN: usize = 15;

fn process_name(process: &Process) -> String {
    let short = process.name().to_string_lossy().into_owned();
    if short.len() < SHORT_NAME_LEN {
        return short;
    }

    let from_cmd = process.cmd().first().map(|arg0| display_name(Path::new(arg0)));
    let from_exe = process.exe().map(display_name);

    let full = from_cmd
        .into_iter()
        .chain(from_exe)
        .find(|full| full.len() > short.len() && full.starts_with(&short));
    full.unwrap_or(short)
}

/// Executable name as the OS reports it, i.e. the last path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
