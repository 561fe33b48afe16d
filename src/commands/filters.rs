//! Active managers and search categories.

use super::open_engine;
use crate::cli::args::CategoryCommand;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use std::path::Path;

pub fn managers(config: Option<&Path>, ids: &[String]) -> Result<()> {
    let engine = open_engine(config)?;
    let active = if ids.is_empty() {
        engine.active_managers()
    } else {
        let active = engine.set_active_managers(ids)?;
        let ignored: Vec<&String> = ids
            .iter()
            .filter(|id| engine.registry().resolve(id).is_none())
            .collect();
        if !ignored.is_empty() {
            output::warning(&format!(
                "Unknown managers ignored: {}",
                ignored
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        active
    };

    output::header("Package managers");
    for manager in engine.registry().iter() {
        let marker = if active.contains(&manager.id) {
            "●".green().to_string()
        } else {
            "○".bright_black().to_string()
        };
        let mut notes = Vec::new();
        if manager.requires_base {
            notes.push("needs scoop");
        }
        if manager.check.is_none() {
            notes.push("no update check");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", ")).dimmed().to_string()
        };
        output::indent(
            &format!("{} {} {}{}", marker, manager.id.bold(), manager.display_label(), notes),
            1,
        );
    }
    Ok(())
}

pub fn categories(config: Option<&Path>, command: Option<&CategoryCommand>) -> Result<()> {
    let engine = open_engine(config)?;
    let categories = match command {
        None => engine.categories(),
        Some(CategoryCommand::Add { category }) => engine.add_category(category)?,
        Some(CategoryCommand::Rm { category }) => engine.remove_category(category)?,
        Some(CategoryCommand::Set { categories }) => engine.set_categories(categories)?,
        Some(CategoryCommand::Clear) => engine.set_categories::<&str>(&[])?,
    };

    if categories.is_empty() {
        output::info("No category filters");
    } else {
        output::keyval("Categories", &categories.join(", "));
    }
    Ok(())
}
