// Tue Jan 13 2026 - Alex

use crate::search::Endpoint;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub label: String,
    pub recording: Option<PathBuf>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            label: String::new(),
            recording: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// mpv invocation: title, optional recording target, stream URL, muted.
    pub fn viewer(program: &Path, label: &str, endpoint: &Endpoint, recording: Option<PathBuf>) -> Self {
        let mut command = Self::new(program)
            .with_label(label)
            .arg(format!("--title={}", label));

        if let Some(path) = &recording {
            command = command.arg(format!("--stream-record={}", path.display()));
        }

        command.recording = recording;
        command.arg(endpoint.stream_url()).arg("--mute=yes")
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }
}

pub fn recording_file(sequence: usize) -> PathBuf {
    PathBuf::from(format!("{}.mkv", sequence))
}
