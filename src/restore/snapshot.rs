use crate::core::types::Bucket;
use crate::error::{DeskError, Result};
use crate::ui;
use crate::utils::sanitize::{validate_bucket_url, validate_package_name};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Exported environment: buckets and installed app names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    pub apps: Vec<String>,
}

impl Snapshot {
    pub fn capture(buckets: Vec<Bucket>, apps: Vec<String>) -> Self {
        Self {
            exported_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            buckets,
            apps,
        }
    }

    /// Parse snapshot text. `apps` must be an array; malformed bucket
    /// entries, non-string apps and names unsafe for a shell are skipped.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DeskError::SnapshotFormat(format!("not valid JSON: {}", e)))?;
        let apps = value
            .get("apps")
            .and_then(Value::as_array)
            .ok_or_else(|| DeskError::SnapshotFormat("missing 'apps' array".to_string()))?;

        let apps = apps
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|app| !app.is_empty())
            .filter(|app| accept(app, validate_package_name(app)))
            .map(str::to_string)
            .collect();
        let buckets = value
            .get("buckets")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| serde_json::from_value::<Bucket>(entry.clone()).ok())
                    .map(|bucket| Bucket::new(bucket.name.trim(), bucket.url))
                    .filter(|bucket| Bucket::is_valid_name(&bucket.name))
                    .filter(|bucket| accept(&bucket.name, validate_bucket(bucket)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            exported_at: value
                .get("exportedAt")
                .and_then(Value::as_str)
                .map(str::to_string),
            buckets,
            apps,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| DeskError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| DeskError::IoError {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| DeskError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// An imported snapshot awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePlan {
    pub source: Option<PathBuf>,
    pub buckets: Vec<Bucket>,
    pub apps: Vec<String>,
}

impl RestorePlan {
    pub fn from_snapshot(snapshot: Snapshot, source: Option<PathBuf>) -> Self {
        Self {
            source,
            buckets: snapshot.buckets,
            apps: snapshot.apps,
        }
    }
}

fn validate_bucket(bucket: &Bucket) -> Result<()> {
    validate_package_name(&bucket.name)?;
    match &bucket.url {
        Some(url) => validate_bucket_url(url),
        None => Ok(()),
    }
}

/// Keep an entry when it validated; warn and drop it otherwise.
fn accept(entry: &str, checked: Result<()>) -> bool {
    match checked {
        Ok(()) => true,
        Err(e) => {
            ui::warning(&format!("Skipping snapshot entry '{}': {}", entry, e));
            false
        }
    }
}

#[cfg(test)]
mod tests;
