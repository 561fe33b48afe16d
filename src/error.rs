use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    /// The manager declares no template for the requested operation
    #[error("{manager} does not support '{operation}'")]
    Unsupported { manager: String, operation: String },

    /// A required tool (base manager, git, ...) is not available
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Command '{command}' failed (exit code {}): {stderr}", exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Another operation is running: {0}")]
    Busy(String),

    #[error("Unknown package manager: {0}")]
    UnknownManager(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid plan step: {0}")]
    InvalidStep(String),

    #[error("Invalid snapshot: {0}")]
    SnapshotFormat(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Lock acquisition failed (e.g., config lock held by another process)
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("{0}")]
    Other(String),
}

impl DeskError {
    /// Conditions the caller is expected to render as a notice rather than a crash.
    pub fn is_user_condition(&self) -> bool {
        matches!(
            self,
            DeskError::Unsupported { .. }
                | DeskError::PreconditionFailed(_)
                | DeskError::Busy(_)
                | DeskError::UnknownManager(_)
                | DeskError::InvalidInput(_)
                | DeskError::InvalidStep(_)
                | DeskError::SnapshotFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_renders_exit_code() {
        let err = DeskError::CommandFailed {
            command: "scoop install git".to_string(),
            exit_code: Some(2),
            stderr: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command 'scoop install git' failed (exit code 2): not found"
        );
    }

    #[test]
    fn user_conditions_are_classified() {
        assert!(DeskError::Busy("search".into()).is_user_condition());
        assert!(
            DeskError::Unsupported {
                manager: "choco".into(),
                operation: "check".into()
            }
            .is_user_condition()
        );
        assert!(!DeskError::Other("boom".into()).is_user_condition());
    }
}
