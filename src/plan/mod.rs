//! Declarative provisioning plans.

pub mod runner;
pub mod sources;
pub mod types;

pub use runner::{StepExecutor, StepReport, execute_step, run_all, run_step};
pub use sources::source_commands;
pub use types::{Plan, PlanStep, SourceAction, SourceConfig, StepAction, StepStatus, template_plan};
