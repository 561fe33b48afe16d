pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod exec;
pub mod managers;
pub mod plan;
pub mod project_identity;
pub mod restore;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run scoopdesk CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling: queued tasks are abandoned, say so before exiting
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::warning("Operation cancelled by user; remaining queued tasks were not run.");
        exit(130);
    }) {
        ui::verbose(&format!("Ctrl-C handler not installed: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        if e.is_user_condition() {
            ui::warning(&format!("{}", e));
        } else {
            ui::error(&format!("{}", e));
        }
        exit(1);
    }
}
