use crate::utils::paths;
use std::path::{Path, PathBuf};

/// Host facts the engine needs for precondition checks.
pub trait SystemProbe: Send + Sync {
    fn dir_exists(&self, path: &Path) -> bool;

    /// Whether an executable is reachable on PATH.
    fn has_executable(&self, name: &str) -> bool;

    /// Storage root of the base manager when no override is configured.
    fn default_base_root(&self) -> Option<PathBuf>;
}

/// Probe backed by the real filesystem and PATH
pub struct HostProbe;

impl SystemProbe for HostProbe {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn has_executable(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn default_base_root(&self) -> Option<PathBuf> {
        paths::default_base_root().ok()
    }
}
