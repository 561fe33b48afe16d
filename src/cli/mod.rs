pub mod args;
pub mod dispatcher;

pub use args::{BucketCommand, CategoryCommand, Cli, Command, GlobalFlags, PlanCommand, SnapshotCommand};
