// Tue Jan 13 2026 - Alex

pub mod command;
pub mod error;
pub mod inspector;
pub mod interrupt;
pub mod pool;
pub mod spawner;

pub use command::LaunchCommand;
pub use error::ProcessError;
pub use inspector::{display_name, ProcessEntry, ProcessInspector, SysinfoInspector};
pub use interrupt::{InterruptCoordinator, InterruptFlag};
pub use pool::{CountScope, DrainOutcome, ProcessPool, TrackedProcess};
pub use spawner::{ChildHandle, OsSpawner, Spawner};

#[cfg(test)]
pub(crate) mod fakes;
