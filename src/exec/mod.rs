//! Process execution seam.
//!
//! A rendered command runs as one shell invocation; the result is the exit
//! code plus captured text. A non-zero exit is data, not an executor error:
//! `Err` is reserved for failing to spawn or wait on the process.

pub mod shell;

#[cfg(test)]
pub mod testing;

use crate::error::{DeskError, Result};
use crate::managers::ExecEncoding;
use std::time::Duration;

pub use shell::ShellRunner;

/// Per-invocation execution options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Do not stream output lines to the terminal while running
    pub quiet: bool,
    pub encoding: ExecEncoding,
    pub env: Vec<(String, String)>,
    /// Kill the process after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl RunOptions {
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Exit code zero and nothing written to stderr.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0) && self.stderr.trim().is_empty()
    }

    /// Turn a failed run into [`DeskError::CommandFailed`].
    pub fn check(self, command: &str) -> Result<Self> {
        if self.succeeded() {
            return Ok(self);
        }
        Err(DeskError::CommandFailed {
            command: command.to_string(),
            exit_code: self.exit_code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs one shell command string. Implementations hold no state shared
/// between calls, so concurrent invocations are independent processes.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str, options: &RunOptions) -> Result<CommandOutput>;
}

/// Decode captured bytes according to the manager's declared encoding.
pub fn decode_output(bytes: &[u8], encoding: ExecEncoding) -> String {
    match encoding {
        ExecEncoding::Utf16le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            let text = String::from_utf16_lossy(&units);
            text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text)
        }
        ExecEncoding::Default | ExecEncoding::Utf8 => {
            let text = String::from_utf8_lossy(bytes);
            text.strip_prefix('\u{feff}')
                .map(str::to_string)
                .unwrap_or_else(|| text.into_owned())
        }
    }
}
