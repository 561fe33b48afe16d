use super::types::AppConfig;
use crate::error::{DeskError, Result};
use crate::ui;
use fs2::FileExt;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of loading the config file
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Set when the file on disk was unreadable and defaults were written
    pub recovered: Option<String>,
}

/// JSON config file with lock-protected atomic writes
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, writing defaults when the file is missing and
    /// recovering (backup + defaults) when it cannot be parsed.
    pub fn load(&self) -> Result<LoadedConfig> {
        let _lock = self.lock()?;
        self.load_locked()
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let _lock = self.lock()?;
        self.write_locked(config)
    }

    /// Load, mutate and save under one exclusive lock.
    pub fn update<F>(&self, mutate: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let _lock = self.lock()?;
        let mut config = self.load_locked()?.config;
        mutate(&mut config);
        self.write_locked(&config)?;
        Ok(config)
    }

    fn load_locked(&self) -> Result<LoadedConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.write_locked(&config)?;
            return Ok(LoadedConfig {
                config,
                recovered: None,
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| DeskError::IoError {
            path: self.path.clone(),
            source: e,
        })?;

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Ok(LoadedConfig {
                config: AppConfig::from_value(&value),
                recovered: None,
            }),
            Err(e) => {
                let reason = format!("Config file corrupted: {}", e);
                ui::error(&reason);
                let backup = self.backup_path();
                if let Err(copy_err) = fs::copy(&self.path, &backup) {
                    ui::warning(&format!(
                        "Failed to back up corrupted config to {}: {}",
                        backup.display(),
                        copy_err
                    ));
                } else {
                    ui::info(&format!("Corrupted config saved to {}", backup.display()));
                }

                let config = AppConfig::default();
                self.write_locked(&config)?;
                Ok(LoadedConfig {
                    config,
                    recovered: Some(reason),
                })
            }
        }
    }

    fn write_locked(&self, config: &AppConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        let tmp_path = with_suffix(&self.path, "tmp");
        write_and_rename(&tmp_path, &self.path, &content)
    }

    /// Exclusive advisory lock on `<path>.lock`, released on drop.
    fn lock(&self) -> Result<ConfigLock> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir).map_err(|e| DeskError::IoError {
            path: dir.clone(),
            source: e,
        })?;

        let lock_path = with_suffix(&self.path, "lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| DeskError::IoError {
                path: lock_path.clone(),
                source: e,
            })?;
        file.lock_exclusive()
            .map_err(|e| DeskError::LockError(format!("{}: {}", lock_path.display(), e)))?;
        Ok(ConfigLock { file })
    }

    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.path, "bak")
    }
}

struct ConfigLock {
    file: File,
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn write_and_rename(tmp_path: &Path, path: &Path, content: &str) -> Result<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| DeskError::IoError {
        path: tmp_path.to_path_buf(),
        source: e,
    })?;
    tmp_file.write_all(content.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| DeskError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests;
