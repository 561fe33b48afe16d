//! search, list, install, uninstall and check.

use super::{finish_queue, open_engine, print_records};
use crate::cli::args::PackageArgs;
use crate::core::types::PackageTarget;
use crate::engine::Submission;
use crate::error::Result;
use crate::ui as output;
use std::path::Path;

pub struct SearchOptions {
    pub query: String,
    pub managers: Vec<String>,
    pub categories: Vec<String>,
}

pub fn search(config: Option<&Path>, options: SearchOptions) -> Result<()> {
    let engine = open_engine(config)?;
    engine.set_session_filters(&options.managers, &options.categories);

    // Installed markers need a fresh list; a failure here only loses markers.
    if let Err(e) = engine.refresh_installed() {
        output::verbose(&format!("Installed list unavailable: {}", e));
    }
    let results = engine.search(&options.query)?;

    if options.query.trim().is_empty() {
        output::header("Installed");
        print_records(&engine, &results, "No installed apps");
    } else {
        output::header(&format!("Results for '{}'", options.query.trim()));
        print_records(&engine, &results, "No results");
    }
    Ok(())
}

pub fn list(config: Option<&Path>, managers: &[String]) -> Result<()> {
    let engine = open_engine(config)?;
    engine.set_session_filters(managers, &[]);
    let installed = engine.refresh_installed()?;

    output::header(&format!("Installed ({})", installed.len()));
    print_records(&engine, &installed, "No installed apps");
    Ok(())
}

fn target(args: &PackageArgs) -> PackageTarget {
    let mut target = PackageTarget::new(args.name.clone());
    target.id = args.id.clone();
    target.manager = args.manager.clone();
    target
}

pub fn install(config: Option<&Path>, args: &PackageArgs) -> Result<()> {
    let engine = open_engine(config)?;
    engine.refresh_installed()?;
    match engine.install(&target(args))? {
        Submission::AlreadyInstalled => Ok(()),
        Submission::Queued(_) => finish_queue(&engine),
    }
}

pub fn uninstall(config: Option<&Path>, args: &PackageArgs) -> Result<()> {
    let engine = open_engine(config)?;
    engine.uninstall(&target(args))?;
    finish_queue(&engine)
}

pub fn check(config: Option<&Path>, args: &PackageArgs) -> Result<()> {
    let engine = open_engine(config)?;
    let target = target(args);
    if engine.check_update(&target)? {
        output::success(&format!("Update available for {}", target.display_name()));
    } else {
        output::info(&format!("{} is up to date", target.display_name()));
    }
    Ok(())
}
