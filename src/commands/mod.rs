//! Command handlers behind the CLI dispatcher.

pub mod buckets;
pub mod completions;
pub mod filters;
pub mod packages;
pub mod plan;
pub mod snapshot;
pub mod status;

use crate::config::ConfigStore;
use crate::core::types::PackageRecord;
use crate::engine::{Engine, HostProbe};
use crate::error::{DeskError, Result};
use crate::exec::ShellRunner;
use crate::ui::{self as output, ActivityLog};
use crate::utils::paths;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Build an engine over the real shell and filesystem and detect the base manager.
pub fn open_engine(config: Option<&Path>) -> Result<Arc<Engine>> {
    let config_path = match config {
        Some(path) => paths::expand_home(path)?,
        None => paths::config_file()?,
    };
    let log_file = paths::log_file_for(&config_path);
    output::verbose(&format!("Using config: {}", config_path.display()));

    let engine = Engine::new(
        ConfigStore::new(config_path),
        Arc::new(ShellRunner),
        Arc::new(HostProbe),
        Arc::new(ActivityLog::new(Some(log_file))),
    )?;
    engine.busy().subscribe(|state| {
        if state.busy {
            output::verbose(&format!("busy: {}", state.message));
        }
    });
    engine.detect_base_manager();
    Ok(engine)
}

/// Wait for queued work and report every task; fails when any task failed.
pub fn finish_queue(engine: &Engine) -> Result<()> {
    engine.queue().wait_idle();
    let outcomes = engine.queue().take_outcomes();
    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();

    for outcome in &outcomes {
        match &outcome.result {
            crate::engine::TaskResult::Succeeded => output::success(&outcome.label),
            crate::engine::TaskResult::Failed(reason) => {
                output::error(&format!("{}: {}", outcome.label, reason))
            }
        }
    }

    if failed > 0 {
        return Err(DeskError::Other(format!(
            "{} of {} queued tasks failed",
            failed,
            outcomes.len()
        )));
    }
    Ok(())
}

pub(crate) fn print_records(engine: &Engine, records: &[PackageRecord], empty: &str) {
    if records.is_empty() {
        output::info(empty);
        return;
    }
    for record in records {
        let label = engine
            .registry()
            .resolve(&record.manager)
            .map(|m| m.display_label().to_string())
            .unwrap_or_else(|| record.manager.clone());
        let id = match &record.id {
            Some(id) if id != &record.name => format!(" ({})", id).dimmed().to_string(),
            _ => String::new(),
        };
        let marker = if engine.is_installed(&record.into()) {
            " [installed]".green().to_string()
        } else {
            String::new()
        };
        output::indent(
            &format!("{}{} {}{}", record.name.bold(), id, label.cyan(), marker),
            1,
        );
    }
}
