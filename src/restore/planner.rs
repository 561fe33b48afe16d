//! Turns a restore plan into an ordered list of queue tasks.
//!
//! Migration reuses the restore sequence behind a destructive prefix:
//! uninstall every tracked app, then move the storage root.

use super::snapshot::RestorePlan;
use crate::core::types::{Bucket, PackageRecord};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreAction {
    /// Provision the base manager when it is missing
    EnsureBase,
    AddBucket(Bucket),
    InstallApp(String),
    UninstallApp(PackageRecord),
    MoveStorage { from: PathBuf, to: PathBuf },
    RefreshInstalled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTask {
    pub label: String,
    pub action: RestoreAction,
}

impl PlannedTask {
    fn new(label: String, action: RestoreAction) -> Self {
        Self { label, action }
    }
}

pub fn restore_tasks(plan: &RestorePlan) -> Vec<PlannedTask> {
    let mut tasks = vec![PlannedTask::new(
        "Prepare restore".to_string(),
        RestoreAction::EnsureBase,
    )];
    tasks.extend(
        plan.buckets
            .iter()
            .filter(|bucket| Bucket::is_valid_name(&bucket.name))
            .map(|bucket| {
                PlannedTask::new(
                    format!("Restore bucket: {}", bucket.name),
                    RestoreAction::AddBucket(bucket.clone()),
                )
            }),
    );
    tasks.extend(plan.apps.iter().map(|app| {
        PlannedTask::new(
            format!("Restore app: {}", app),
            RestoreAction::InstallApp(app.clone()),
        )
    }));
    tasks.push(PlannedTask::new(
        "Refresh installed list".to_string(),
        RestoreAction::RefreshInstalled,
    ));
    tasks
}

pub fn migration_tasks(
    installed: &[PackageRecord],
    from: PathBuf,
    to: PathBuf,
    plan: &RestorePlan,
) -> Vec<PlannedTask> {
    let mut tasks: Vec<PlannedTask> = installed
        .iter()
        .map(|record| {
            PlannedTask::new(
                format!("Uninstall before migration: {}", record.name),
                RestoreAction::UninstallApp(record.clone()),
            )
        })
        .collect();
    tasks.push(PlannedTask::new(
        format!("Move storage to {}", to.display()),
        RestoreAction::MoveStorage { from, to },
    ));
    tasks.extend(restore_tasks(plan));
    tasks
}
