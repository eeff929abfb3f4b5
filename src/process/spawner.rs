// Tue Jan 13 2026 - Alex

use super::LaunchCommand;
use std::io;
use std::process::{Child, Command, Stdio};

/// A launched child the pool owns until it is reaped.
pub trait ChildHandle: Send {
    fn id(&self) -> u32;

    fn kill(&mut self) -> io::Result<()>;

    /// Collects the exit status so no zombie entry is left behind.
    fn reap(&mut self) -> io::Result<()>;
}

impl ChildHandle for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn kill(&mut self) -> io::Result<()> {
        Child::kill(self)
    }

    fn reap(&mut self) -> io::Result<()> {
        self.wait().map(|_| ())
    }
}

pub trait Spawner: Send + Sync {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<Box<dyn ChildHandle>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<Box<dyn ChildHandle>> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Box::new(child))
    }
}
