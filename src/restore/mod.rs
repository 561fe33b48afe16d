//! Environment snapshots, restore and storage migration.

pub mod planner;
pub mod snapshot;

pub use planner::{PlannedTask, RestoreAction, migration_tasks, restore_tasks};
pub use snapshot::{RestorePlan, Snapshot};
