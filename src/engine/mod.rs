//! Orchestration engine.
//!
//! [`Engine`] owns the manager registry, the process runner, the busy stack
//! and the task queue. Ad hoc operations go through [`Engine::run_exclusive`],
//! which rejects new work while something else holds the busy stack unless
//! the queue is draining. Mutating package operations are queued.

pub mod busy;
mod buckets;
pub mod gate;
mod packages;
mod plans;
pub mod probe;
pub mod queue;

pub use busy::{BusyGuard, BusyStack, BusyState, BusyToken};
pub use gate::{ActionGate, GateInputs};
pub use packages::Submission;
pub use probe::{HostProbe, SystemProbe};
pub use queue::{TaskId, TaskOutcome, TaskQueue, TaskResult};

use crate::config::{AppConfig, ConfigStore};
use crate::core::types::{Bucket, PackageRecord};
use crate::error::{DeskError, Result};
use crate::exec::{CommandOutput, CommandRunner, RunOptions};
use crate::managers::registry::BASE_ROOT_ENV;
use crate::managers::{ManagerDefinition, ManagerRegistry};
use crate::plan::{Plan, StepStatus};
use crate::restore::RestorePlan;
use crate::ui::ActivityLog;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide view of the desk, mutated only by completed operations.
#[derive(Debug, Clone, Default)]
pub struct DeskState {
    pub active: Vec<String>,
    pub categories: Vec<String>,
    pub buckets: Vec<Bucket>,
    pub installed: Vec<PackageRecord>,
    pub search_results: Vec<PackageRecord>,
    pub base_present: bool,
    pub restore_plan: Option<RestorePlan>,
    pub advanced: Option<Plan>,
    pub advanced_status: Vec<StepStatus>,
    pub storage_root: Option<PathBuf>,
}

pub struct Engine {
    registry: ManagerRegistry,
    runner: Arc<dyn CommandRunner>,
    probe: Arc<dyn SystemProbe>,
    store: ConfigStore,
    log: Arc<ActivityLog>,
    busy: BusyStack,
    queue: TaskQueue,
    state: RwLock<DeskState>,
}

impl Engine {
    /// Load configuration and seed the registry and state from it.
    pub fn new(
        store: ConfigStore,
        runner: Arc<dyn CommandRunner>,
        probe: Arc<dyn SystemProbe>,
        log: Arc<ActivityLog>,
    ) -> Result<Arc<Self>> {
        let loaded = store.load()?;
        if let Some(reason) = &loaded.recovered {
            log.error(&format!("{}; configuration reset to defaults", reason));
        }
        let config = loaded.config;

        let registry = ManagerRegistry::with_builtins(&config.managers);
        if registry.is_empty() {
            return Err(DeskError::ConfigError(
                "no package managers are registered".to_string(),
            ));
        }

        let state = DeskState {
            active: registry.active_set(&config.requested_managers()),
            categories: normalize_categories(&config.store.categories),
            buckets: config.buckets.clone(),
            advanced_status: config
                .advanced
                .as_ref()
                .map(Plan::pending_statuses)
                .unwrap_or_default(),
            advanced: config.advanced.clone(),
            storage_root: config.storage_root.clone(),
            ..Default::default()
        };

        let busy = BusyStack::new();
        let queue = TaskQueue::new(busy.clone(), Arc::clone(&log));
        Ok(Arc::new(Self {
            registry,
            runner,
            probe,
            store,
            log,
            busy,
            queue,
            state: RwLock::new(state),
        }))
    }

    pub fn registry(&self) -> &ManagerRegistry {
        &self.registry
    }

    pub fn busy(&self) -> &BusyStack {
        &self.busy
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn snapshot_state(&self) -> DeskState {
        self.read().clone()
    }

    pub fn active_managers(&self) -> Vec<String> {
        self.read().active.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.read().categories.clone()
    }

    pub fn base_present(&self) -> bool {
        self.read().base_present
    }

    pub fn gate(&self) -> ActionGate {
        let state = self.read();
        ActionGate::compute(GateInputs {
            busy: self.busy.is_busy(),
            base_present: state.base_present,
            has_restore_plan: state.restore_plan.is_some(),
            has_advanced_plan: state.advanced.is_some(),
        })
    }

    /// Run an ad hoc operation under a busy entry.
    ///
    /// Rejected with [`DeskError::Busy`] when something already holds the
    /// busy stack, `allow_while_busy` is false and no queue drain is active.
    pub fn run_exclusive<T, F>(&self, label: &str, allow_while_busy: bool, work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let admitted = self.busy.guard_if(label, |state| {
            !state.busy || allow_while_busy || self.queue.is_draining()
        });
        let _guard = match admitted {
            Ok(guard) => guard,
            Err(current) => {
                self.log.error(&format!(
                    "Cannot start '{}': {} is in progress",
                    label, current.message
                ));
                return Err(DeskError::Busy(current.message));
            }
        };
        work()
    }

    /// Replace the active manager set and persist it.
    pub fn set_active_managers<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<String>> {
        let active = self.registry.active_set(ids);
        let persisted = active.clone();
        self.store.update(move |config| {
            config.store.manager = persisted.first().cloned();
            config.store.managers = persisted;
        })?;
        self.write().active = active.clone();
        self.log.info(&format!("Active managers: {}", active.join(", ")));
        Ok(active)
    }

    /// Replace the selected search categories and persist them.
    pub fn set_categories<S: AsRef<str>>(&self, categories: &[S]) -> Result<Vec<String>> {
        let normalized = normalize_categories(categories);
        let persisted = normalized.clone();
        self.store
            .update(move |config| config.store.categories = persisted)?;
        self.write().categories = normalized.clone();
        Ok(normalized)
    }

    /// Narrow managers and categories for this process only, without persisting.
    pub fn set_session_filters(&self, managers: &[String], categories: &[String]) {
        let mut state = self.write();
        if !managers.is_empty() {
            state.active = self.registry.active_set(managers);
        }
        if !categories.is_empty() {
            state.categories = normalize_categories(categories);
        }
    }

    pub fn add_category(&self, category: &str) -> Result<Vec<String>> {
        let mut categories = self.categories();
        categories.push(category.to_string());
        self.set_categories(&categories)
    }

    pub fn remove_category(&self, category: &str) -> Result<Vec<String>> {
        let category = category.trim();
        let categories: Vec<String> = self
            .categories()
            .into_iter()
            .filter(|c| c != category)
            .collect();
        self.set_categories(&categories)
    }

    /// Storage root of the base manager: the configured override, else the default.
    pub fn base_root(&self) -> Option<PathBuf> {
        self.read()
            .storage_root
            .clone()
            .or_else(|| self.probe.default_base_root())
    }

    /// Detect the base manager by its storage root or executable.
    pub fn detect_base_manager(&self) -> bool {
        let by_root = self
            .base_root()
            .is_some_and(|root| self.probe.dir_exists(&root));
        let present = by_root || self.probe.has_executable(crate::managers::BASE_MANAGER_ID);
        self.write().base_present = present;
        crate::ui::verbose(&format!(
            "Base manager {}",
            if present { "detected" } else { "not found" }
        ));
        present
    }

    /// Fail with a precondition error when the base manager is absent.
    pub fn require_base(&self, action: &str) -> Result<()> {
        if self.base_present() {
            return Ok(());
        }
        let message = format!("Scoop was not detected; cannot {}", action);
        self.log.error(&message);
        Err(DeskError::PreconditionFailed(message))
    }

    pub(crate) fn load_config(&self) -> Result<AppConfig> {
        Ok(self.store.load()?.config)
    }

    /// Run a command with the manager's encoding and the storage root override.
    pub(crate) fn run_for(
        &self,
        manager: Option<&ManagerDefinition>,
        command: &str,
        quiet: bool,
    ) -> Result<CommandOutput> {
        let mut options = RunOptions {
            quiet,
            ..Default::default()
        };
        if let Some(manager) = manager {
            options.encoding = manager.encoding;
        }
        if let Some(root) = &self.read().storage_root {
            options
                .env
                .push((BASE_ROOT_ENV.to_string(), root.to_string_lossy().into_owned()));
        }
        crate::ui::verbose(&format!("$ {}", command));
        self.runner.run(command, &options)
    }

    /// Like [`Engine::run_for`] but a failed run is an error.
    pub(crate) fn run_checked(
        &self,
        manager: Option<&ManagerDefinition>,
        command: &str,
    ) -> Result<CommandOutput> {
        self.run_for(manager, command, false)?.check(command)
    }

    fn read(&self) -> RwLockReadGuard<'_, DeskState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DeskState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Trim, drop empties and duplicates, keep first-seen order.
pub fn normalize_categories<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for category in categories {
        let category = category.as_ref().trim();
        if !category.is_empty() && !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}
