use super::open_engine;
use crate::cli::args::PlanCommand;
use crate::error::{DeskError, Result};
use crate::plan::{Plan, StepReport, StepStatus, template_plan};
use crate::ui as output;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub fn run(config: Option<&Path>, command: &PlanCommand) -> Result<()> {
    match command {
        PlanCommand::Template => {
            println!("{}", serde_json::to_string_pretty(&template_plan())?);
            Ok(())
        }
        PlanCommand::Load { file } => {
            let raw = fs::read_to_string(file).map_err(|e| DeskError::IoError {
                path: file.clone(),
                source: e,
            })?;
            let engine = open_engine(config)?;
            let plan = engine.load_plan(&raw)?;
            print_plan(&plan, &plan.pending_statuses());
            Ok(())
        }
        PlanCommand::Show => {
            let engine = open_engine(config)?;
            match engine.advanced_plan() {
                Some((plan, statuses)) => print_plan(&plan, &statuses),
                None => output::info("No plan loaded"),
            }
            Ok(())
        }
        PlanCommand::Run => {
            let engine = open_engine(config)?;
            let reports = engine.run_plan(&mut print_transition)?;
            summarize(&reports)
        }
        PlanCommand::Step { number } => {
            let index = number.checked_sub(1).ok_or_else(|| {
                DeskError::InvalidInput("step numbers start at 1".to_string())
            })?;
            let engine = open_engine(config)?;
            let report = engine.run_plan_step(index, &mut print_transition)?;
            summarize(&[report])
        }
    }
}

fn print_transition(index: usize, status: StepStatus) {
    if status == StepStatus::Running {
        output::verbose(&format!("Step {} running", index + 1));
    }
}

fn summarize(reports: &[StepReport]) -> Result<()> {
    for report in reports {
        match &report.error {
            None => output::success(&format!("Step {} done", report.index + 1)),
            Some(error) => output::error(&format!("Step {} failed: {}", report.index + 1, error)),
        }
    }
    let failed = reports
        .iter()
        .filter(|r| r.status == StepStatus::Error)
        .count();
    if failed > 0 {
        return Err(DeskError::Other(format!("{} plan step(s) failed", failed)));
    }
    Ok(())
}

fn print_plan(plan: &Plan, statuses: &[StepStatus]) {
    output::header(plan.display_title());
    for (index, step) in plan.steps.iter().enumerate() {
        let status = statuses.get(index).copied().unwrap_or_default();
        let pill = match status {
            StepStatus::Pending => status.to_string().bright_black(),
            StepStatus::Running => status.to_string().yellow(),
            StepStatus::Done => status.to_string().green(),
            StepStatus::Error => status.to_string().red(),
        };
        output::indent(&format!("{}. {} [{}]", index + 1, step.title().bold(), pill), 1);
        if let Some(description) = &step.description {
            output::indent(&description.dimmed().to_string(), 2);
        }
    }
}
