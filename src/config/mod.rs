//! Persistent application settings.
//!
//! The config lives in a single JSON document. Loading is forgiving:
//! unknown keys are ignored, malformed fields fall back to defaults and an
//! unparseable file is backed up and replaced.

pub mod store;
pub mod types;

pub use store::{ConfigStore, LoadedConfig};
pub use types::{AppConfig, Layout, StoreConfig};
