use crate::core::types::{Bucket, default_buckets};
use crate::managers::ManagerOverride;
use crate::plan::Plan;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Persisted application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_buckets")]
    pub buckets: Vec<Bucket>,

    /// Last loaded provisioning plan
    #[serde(default)]
    pub advanced: Option<Plan>,

    /// User-declared manager overrides, merged over the built-ins
    #[serde(default)]
    pub managers: Vec<ManagerOverride>,

    #[serde(default)]
    pub store: StoreConfig,

    /// Storage root of the base manager when not the default `~/scoop`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Single active manager written by older versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default)]
    pub managers: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub layout: Layout,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            manager: Some("scoop".to_string()),
            managers: vec!["scoop".to_string()],
            categories: Vec::new(),
            layout: Layout::List,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            advanced: None,
            managers: Vec::new(),
            store: StoreConfig::default(),
            storage_root: None,
        }
    }
}

impl AppConfig {
    /// Build a config from arbitrary JSON, replacing each malformed field
    /// with its default instead of rejecting the whole document.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let defaults = Self::default();

        let store = match obj.get("store").and_then(Value::as_object) {
            Some(store) => StoreConfig {
                manager: field(store, "manager", || defaults.store.manager.clone()),
                managers: field(store, "managers", || defaults.store.managers.clone()),
                categories: field(store, "categories", Vec::new),
                layout: field(store, "layout", Layout::default),
            },
            None => defaults.store.clone(),
        };

        Self {
            buckets: field(obj, "buckets", default_buckets),
            advanced: field(obj, "advanced", || None),
            managers: field(obj, "managers", Vec::new),
            store,
            storage_root: field(obj, "storageRoot", || None),
        }
    }

    /// Manager ids requested by the store section, honouring the legacy single id.
    pub fn requested_managers(&self) -> Vec<String> {
        if !self.store.managers.is_empty() {
            return self.store.managers.clone();
        }
        self.store.manager.iter().cloned().collect()
    }

    /// Insert or replace a bucket by name.
    pub fn upsert_bucket(&mut self, bucket: Bucket) {
        match self.buckets.iter_mut().find(|b| b.name == bucket.name) {
            Some(existing) => *existing = bucket,
            None => self.buckets.push(bucket),
        }
    }

    pub fn remove_bucket(&mut self, name: &str) {
        self.buckets.retain(|b| b.name != name);
    }
}

fn field<T, F>(obj: &Map<String, Value>, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    obj.get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_else(default)
}

#[cfg(test)]
mod tests;
