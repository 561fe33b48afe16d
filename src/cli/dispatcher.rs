//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::error::Result;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let config = args.global.config.as_deref();

    match &args.command {
        Some(Command::Search {
            query,
            managers,
            categories,
        }) => commands::packages::search(
            config,
            commands::packages::SearchOptions {
                query: query.clone(),
                managers: managers.clone(),
                categories: categories.clone(),
            },
        ),
        Some(Command::List { managers }) => commands::packages::list(config, managers),
        Some(Command::Install(pkg)) => commands::packages::install(config, pkg),
        Some(Command::Uninstall(pkg)) => commands::packages::uninstall(config, pkg),
        Some(Command::Check(pkg)) => commands::packages::check(config, pkg),
        Some(Command::Bucket { command }) => commands::buckets::run(config, command),
        Some(Command::Managers { ids }) => commands::filters::managers(config, ids),
        Some(Command::Categories { command }) => {
            commands::filters::categories(config, command.as_ref())
        }
        Some(Command::Plan { command }) => commands::plan::run(config, command),
        Some(Command::Snapshot { command }) => commands::snapshot::run(config, command),
        Some(Command::Restore { file }) => commands::snapshot::restore(config, file),
        Some(Command::Migrate { target }) => commands::snapshot::migrate(config, target),
        Some(Command::Provision) => commands::snapshot::provision(config),
        Some(Command::Status) | None => {
            if args.command.is_none() {
                output::verbose("No command given; showing status");
            }
            commands::status::run(config)
        }
        Some(Command::Completions { shell }) => commands::completions::run(*shell),
    }
}
