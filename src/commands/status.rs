use super::open_engine;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use std::path::Path;

pub fn run(config: Option<&Path>) -> Result<()> {
    let engine = open_engine(config)?;
    let state = engine.snapshot_state();
    let gate = engine.gate();

    output::header("Status");
    output::keyval(
        "Scoop",
        &if state.base_present {
            "detected".green().to_string()
        } else {
            "not detected".yellow().to_string()
        },
    );
    if let Some(root) = engine.base_root() {
        output::keyval("Storage root", &root.display().to_string());
    }
    output::keyval("Active managers", &state.active.join(", "));
    if !state.categories.is_empty() {
        output::keyval("Categories", &state.categories.join(", "));
    }
    output::keyval("Buckets", &state.buckets.len().to_string());
    output::keyval(
        "Plan",
        &state
            .advanced
            .as_ref()
            .map(|plan| format!("{} ({} steps)", plan.display_title(), plan.steps.len()))
            .unwrap_or_else(|| "none".to_string()),
    );
    output::keyval("Config", &engine.config_store().path().display().to_string());

    output::header("Actions");
    let flag = |enabled: bool| {
        if enabled {
            "available".green().to_string()
        } else {
            "unavailable".bright_black().to_string()
        }
    };
    output::keyval("Scoop actions", &flag(gate.base_actions));
    output::keyval("Install Scoop", &flag(gate.provision));
    output::keyval("Run plan", &flag(gate.run_advanced));

    let errors = engine.log().error_count();
    if errors > 0 {
        output::warning(&format!("{} errors logged this session", errors));
    }
    Ok(())
}
