//! Provisioning plans, snapshots, restore and migration.

use super::Engine;
use super::queue::TaskId;
use crate::core::types::{Bucket, PackageTarget};
use crate::error::{DeskError, Result};
use crate::managers::{BASE_MANAGER_ID, Operation, TemplateValues, render_opt};
use crate::plan::{self, Plan, StepExecutor, StepReport, StepStatus};
use crate::restore::{
    PlannedTask, RestoreAction, RestorePlan, Snapshot, migration_tasks, restore_tasks,
};
use crate::utils::sanitize::validate_package_name;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

impl Engine {
    /// Parse a plan, reset its statuses and persist it as the advanced plan.
    pub fn load_plan(&self, raw: &str) -> Result<Plan> {
        let plan = Plan::parse(raw).inspect_err(|e| {
            self.log.error(&format!("Failed to load plan: {}", e));
        })?;
        let persisted = plan.clone();
        self.store
            .update(move |config| config.advanced = Some(persisted))?;
        {
            let mut state = self.write();
            state.advanced_status = plan.pending_statuses();
            state.advanced = Some(plan.clone());
        }
        self.log.info(&format!(
            "Plan loaded: {} ({} steps)",
            plan.display_title(),
            plan.steps.len()
        ));
        Ok(plan)
    }

    pub fn advanced_plan(&self) -> Option<(Plan, Vec<StepStatus>)> {
        let state = self.read();
        state
            .advanced
            .clone()
            .map(|plan| (plan, state.advanced_status.clone()))
    }

    /// Run one step of the loaded plan.
    pub fn run_plan_step(
        &self,
        index: usize,
        observer: &mut dyn FnMut(usize, StepStatus),
    ) -> Result<StepReport> {
        let (plan, mut statuses) = self
            .advanced_plan()
            .ok_or_else(|| DeskError::PreconditionFailed("no plan loaded".to_string()))?;

        self.run_exclusive(&format!("Plan step {}", index + 1), false, || {
            if let Some(step) = plan.steps.get(index) {
                self.log
                    .info(&format!("Plan step {}: {}", index + 1, step.title()));
            }
            let report = plan::run_step(self, &plan, &mut statuses, index, &mut |i, status| {
                self.set_step_status(i, status);
                observer(i, status);
            })?;
            if let Some(error) = &report.error {
                self.log
                    .error(&format!("Plan step {} failed: {}", index + 1, error));
            }
            Ok(report)
        })
    }

    /// Run every step in order, continuing past failures.
    pub fn run_plan(&self, observer: &mut dyn FnMut(usize, StepStatus)) -> Result<Vec<StepReport>> {
        let (plan, _) = self
            .advanced_plan()
            .ok_or_else(|| DeskError::PreconditionFailed("no plan loaded".to_string()))?;
        let mut reports = Vec::with_capacity(plan.steps.len());
        for index in 0..plan.steps.len() {
            reports.push(self.run_plan_step(index, observer)?);
        }
        self.log.info("Plan run finished");
        Ok(reports)
    }

    fn set_step_status(&self, index: usize, status: StepStatus) {
        let mut state = self.write();
        if let Some(slot) = state.advanced_status.get_mut(index) {
            *slot = status;
        }
    }

    /// Refresh the installed list and capture buckets plus app names.
    /// Buckets plus the apps installed through the base manager.
    pub fn capture_snapshot(&self) -> Result<Snapshot> {
        self.require_base("export the environment")?;
        let installed = self.refresh_installed()?;
        let live = self.buckets();
        let buckets = if live.is_empty() {
            self.load_config()?.buckets
        } else {
            live
        };
        let apps = installed
            .iter()
            .filter(|record| record.manager == BASE_MANAGER_ID)
            .map(|record| record.name.clone())
            .collect();
        Ok(Snapshot::capture(buckets, apps))
    }

    pub fn export_snapshot(&self, path: &Path) -> Result<Snapshot> {
        self.run_exclusive("Export environment", false, || {
            let snapshot = self.capture_snapshot()?;
            snapshot.write(path)?;
            self.log
                .info(&format!("Environment exported to {}", path.display()));
            Ok(snapshot)
        })
    }

    /// Parse snapshot text and hold it as the pending restore plan.
    pub fn import_snapshot(&self, raw: &str, source: Option<PathBuf>) -> Result<RestorePlan> {
        let snapshot = Snapshot::parse(raw).inspect_err(|e| {
            self.log.error(&format!("Snapshot rejected: {}", e));
        })?;
        let plan = RestorePlan::from_snapshot(snapshot, source);
        self.write().restore_plan = Some(plan.clone());
        self.log.info(&format!(
            "Restore plan loaded: {} buckets, {} apps",
            plan.buckets.len(),
            plan.apps.len()
        ));
        Ok(plan)
    }

    pub fn import_snapshot_file(&self, path: &Path) -> Result<RestorePlan> {
        let raw = fs::read_to_string(path).map_err(|e| DeskError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.import_snapshot(&raw, Some(path.to_path_buf()))
    }

    pub fn restore_plan(&self) -> Option<RestorePlan> {
        self.read().restore_plan.clone()
    }

    /// Queue the loaded restore plan.
    pub fn run_restore(self: &Arc<Self>) -> Result<Vec<TaskId>> {
        let plan = self
            .restore_plan()
            .ok_or_else(|| DeskError::PreconditionFailed("no restore plan loaded".to_string()))?;
        self.enqueue_planned(restore_tasks(&plan))
    }

    /// Move the base manager's storage root and reinstall everything there.
    ///
    /// Base-manager apps are captured, uninstalled, the root is renamed to
    /// `new_root` and the captured environment is restored.
    pub fn migrate(self: &Arc<Self>, new_root: &Path) -> Result<Vec<TaskId>> {
        self.require_base("migrate")?;
        let from = self.base_root().ok_or_else(|| {
            DeskError::PreconditionFailed("Scoop storage root is unknown".to_string())
        })?;
        if from == new_root {
            return Err(DeskError::InvalidInput(format!(
                "{} is already the storage root",
                new_root.display()
            )));
        }

        let tasks = self.run_exclusive("Prepare migration", false, || {
            let snapshot = self.capture_snapshot()?;
            let base_id = crate::managers::BASE_MANAGER_ID;
            let tracked: Vec<_> = self
                .installed()
                .into_iter()
                .filter(|record| record.manager == base_id)
                .collect();
            let apps = tracked.iter().map(|r| r.name.clone()).collect();
            let plan = RestorePlan {
                source: None,
                buckets: snapshot.buckets,
                apps,
            };
            Ok(migration_tasks(&tracked, from.clone(), new_root.to_path_buf(), &plan))
        })?;
        self.log.info(&format!(
            "Migrating {} to {}",
            from.display(),
            new_root.display()
        ));
        self.enqueue_planned(tasks)
    }

    fn enqueue_planned(self: &Arc<Self>, tasks: Vec<PlannedTask>) -> Result<Vec<TaskId>> {
        tasks
            .into_iter()
            .map(|task| {
                let engine = Arc::clone(self);
                let action = task.action;
                self.queue
                    .enqueue(task.label, move || engine.apply_restore_action(action))
            })
            .collect()
    }

    fn apply_restore_action(&self, action: RestoreAction) -> Result<()> {
        match action {
            RestoreAction::EnsureBase => {
                if self.detect_base_manager() {
                    return Ok(());
                }
                self.log
                    .info("Scoop was not detected; installing it first");
                if self.provision_base_manager()? {
                    Ok(())
                } else {
                    Err(DeskError::PreconditionFailed(
                        "Scoop is still missing after installation".to_string(),
                    ))
                }
            }
            RestoreAction::AddBucket(Bucket { name, url }) => {
                self.add_bucket(&name, url.as_deref())
            }
            RestoreAction::InstallApp(app) => {
                self.log.info(&format!("Restoring: {}", app));
                self.run_base_install(&app)
            }
            RestoreAction::UninstallApp(record) => {
                let target = PackageTarget::from(&record);
                let manager = self.manager_for(&target)?;
                let command = self.package_command(manager, &target, Operation::Uninstall)?;
                self.run_checked(Some(manager), &command).map(|_| ())
            }
            RestoreAction::MoveStorage { from, to } => self.move_storage(&from, &to),
            RestoreAction::RefreshInstalled => {
                self.refresh_installed()?;
                self.log.info("Environment restore finished");
                Ok(())
            }
        }
    }

    /// Install through the base manager's install template.
    fn run_base_install(&self, app: &str) -> Result<()> {
        validate_package_name(app)?;
        let manager = self.registry.base_manager().ok_or_else(|| {
            DeskError::UnknownManager(BASE_MANAGER_ID.to_string())
        })?;
        let values = TemplateValues::new().set("name", app).set("id", app);
        let command = render_opt(manager.template(Operation::Install), &values).ok_or_else(|| {
            DeskError::Unsupported {
                manager: manager.display_label().to_string(),
                operation: Operation::Install.to_string(),
            }
        })?;
        self.run_checked(Some(manager), &command).map(|_| ())
    }

    /// Rename the storage root and persist the new location.
    ///
    /// Cross-device moves are not supported and fail this step.
    fn move_storage(&self, from: &Path, to: &Path) -> Result<()> {
        if to.exists()
            && fs::read_dir(to)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(true)
        {
            return Err(DeskError::PreconditionFailed(format!(
                "{} already exists and is not empty",
                to.display()
            )));
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| DeskError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        if to.exists() {
            fs::remove_dir(to).map_err(|e| DeskError::IoError {
                path: to.to_path_buf(),
                source: e,
            })?;
        }
        fs::rename(from, to).map_err(|e| DeskError::IoError {
            path: to.to_path_buf(),
            source: e,
        })?;

        let root = to.to_path_buf();
        let persisted = root.clone();
        self.store
            .update(move |config| config.storage_root = Some(persisted))?;
        self.write().storage_root = Some(root);
        self.log
            .info(&format!("Storage moved from {} to {}", from.display(), to.display()));
        Ok(())
    }
}

impl StepExecutor for Engine {
    fn add_bucket(&self, name: &str, url: Option<&str>) -> Result<()> {
        Engine::add_bucket(self, name, url)
    }

    fn install_base_app(&self, name: &str) -> Result<()> {
        self.require_base("install apps")?;
        self.run_base_install(name)
    }

    fn run_command(&self, command: &str) -> Result<()> {
        self.run_checked(None, command).map(|_| ())
    }
}
