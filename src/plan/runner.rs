//! Sequential plan execution with per-step status tracking.
//!
//! Steps run strictly in order. A failing step is marked `error` and the
//! run continues with the next step.

use super::sources::source_commands;
use super::types::{Plan, PlanStep, StepAction, StepStatus};
use crate::error::{DeskError, Result};

/// Operations a plan step can delegate to.
pub trait StepExecutor {
    /// Register a bucket with the base manager.
    fn add_bucket(&self, name: &str, url: Option<&str>) -> Result<()>;

    /// Install an app through the base manager, failing when it is absent.
    fn install_base_app(&self, name: &str) -> Result<()>;

    /// Run one literal shell command, failing on a non-zero exit.
    fn run_command(&self, command: &str) -> Result<()>;
}

/// Outcome of one step within a run
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub status: StepStatus,
    pub error: Option<String>,
}

/// Dispatch a single step without touching any status.
pub fn execute_step(executor: &dyn StepExecutor, step: &PlanStep) -> Result<()> {
    match &step.action {
        StepAction::BucketAdd { name, url } => executor.add_bucket(name, url.as_deref()),
        StepAction::AppInstall { name } => executor.install_base_app(name),
        StepAction::SourceConfig(source) => {
            let commands = source_commands(source).ok_or_else(|| {
                DeskError::InvalidStep("incomplete source parameters".to_string())
            })?;
            commands
                .iter()
                .try_for_each(|command| executor.run_command(command))
        }
        StepAction::RawCommand {
            command, commands, ..
        } => match (commands, command) {
            (Some(list), _) => list.iter().try_for_each(|c| executor.run_command(c)),
            (None, Some(single)) => executor.run_command(single),
            (None, None) => Ok(()),
        },
        StepAction::Unknown => Err(DeskError::InvalidStep("unsupported step type".to_string())),
    }
}

/// Run the step at `index`, moving its status through running to done or error.
pub fn run_step(
    executor: &dyn StepExecutor,
    plan: &Plan,
    statuses: &mut Vec<StepStatus>,
    index: usize,
    observer: &mut dyn FnMut(usize, StepStatus),
) -> Result<StepReport> {
    let step = plan.steps.get(index).ok_or_else(|| {
        DeskError::InvalidStep(format!(
            "step {} does not exist (plan has {} steps)",
            index + 1,
            plan.steps.len()
        ))
    })?;
    if statuses.len() != plan.steps.len() {
        statuses.resize(plan.steps.len(), StepStatus::Pending);
    }

    statuses[index] = StepStatus::Running;
    observer(index, StepStatus::Running);

    let (status, error) = match execute_step(executor, step) {
        Ok(()) => (StepStatus::Done, None),
        Err(e) => (StepStatus::Error, Some(e.to_string())),
    };
    statuses[index] = status;
    observer(index, status);

    Ok(StepReport {
        index,
        status,
        error,
    })
}

/// Run every step in order; failures never stop the remaining steps.
pub fn run_all(
    executor: &dyn StepExecutor,
    plan: &Plan,
    statuses: &mut Vec<StepStatus>,
    observer: &mut dyn FnMut(usize, StepStatus),
) -> Vec<StepReport> {
    (0..plan.steps.len())
        .filter_map(|index| run_step(executor, plan, statuses, index, observer).ok())
        .collect()
}
