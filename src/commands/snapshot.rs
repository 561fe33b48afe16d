//! Snapshot export/import, restore, migration and base provisioning.

use super::{finish_queue, open_engine};
use crate::cli::args::SnapshotCommand;
use crate::error::Result;
use crate::restore::{RestorePlan, Snapshot, restore_tasks};
use crate::ui as output;
use colored::Colorize;
use std::path::Path;

pub fn run(config: Option<&Path>, command: &SnapshotCommand) -> Result<()> {
    match command {
        SnapshotCommand::Export { file } => {
            let engine = open_engine(config)?;
            let snapshot = engine.export_snapshot(file)?;
            output::success(&format!(
                "Exported {} apps and {} buckets to {}",
                snapshot.apps.len(),
                snapshot.buckets.len(),
                file.display()
            ));
            Ok(())
        }
        SnapshotCommand::Import { file } => {
            let engine = open_engine(config)?;
            let plan = engine.import_snapshot_file(file)?;
            print_restore_preview(&plan);
            output::info(&format!(
                "Run '{}' to apply it",
                crate::project_identity::cli_with(&format!("restore {}", file.display()))
            ));
            Ok(())
        }
        SnapshotCommand::Show { file } => {
            let snapshot = Snapshot::read(file)?;
            output::header(&format!("Snapshot {}", file.display()));
            if let Some(at) = &snapshot.exported_at {
                output::keyval("Exported at", at);
            }
            output::keyval("Buckets", &snapshot.buckets.len().to_string());
            for bucket in &snapshot.buckets {
                output::indent(&bucket.name, 1);
            }
            output::keyval("Apps", &snapshot.apps.len().to_string());
            for app in &snapshot.apps {
                output::indent(app, 1);
            }
            Ok(())
        }
    }
}

fn print_restore_preview(plan: &RestorePlan) {
    output::header(&format!(
        "Restore plan: {} buckets, {} apps",
        plan.buckets.len(),
        plan.apps.len()
    ));
    for (index, task) in restore_tasks(plan).iter().enumerate() {
        output::indent(&format!("{}. {}", index + 1, task.label), 1);
    }
}

pub fn restore(config: Option<&Path>, file: &Path) -> Result<()> {
    let engine = open_engine(config)?;
    let plan = engine.import_snapshot_file(file)?;
    print_restore_preview(&plan);
    engine.run_restore()?;
    finish_queue(&engine)
}

pub fn migrate(config: Option<&Path>, target: &Path) -> Result<()> {
    let engine = open_engine(config)?;
    let target = crate::utils::paths::expand_home(target)?;
    let ids = engine.migrate(&target)?;
    output::info(&format!("{} migration tasks queued", ids.len()));
    finish_queue(&engine)?;
    output::success(&format!("Scoop now lives in {}", target.display().to_string().bold()));
    Ok(())
}

pub fn provision(config: Option<&Path>) -> Result<()> {
    let engine = open_engine(config)?;
    if engine.base_present() {
        output::info("Scoop is already installed");
        return Ok(());
    }
    if engine.provision_base_manager()? {
        output::success("Scoop installed");
    } else {
        output::warning("Installer finished but Scoop was not detected");
    }
    Ok(())
}
