//! Search, installed-list and install/uninstall intents.

use super::Engine;
use super::queue::TaskId;
use crate::core::aggregate::merge;
use crate::core::types::{PackageRecord, PackageTarget};
use crate::error::{DeskError, Result};
use crate::managers::parsers::parse_manager_output;
use crate::managers::{ManagerDefinition, Operation, TemplateValues, render, render_opt};
use crate::utils::sanitize::validate_package_name;
use rayon::prelude::*;
use std::sync::Arc;

/// What happened to an install/uninstall request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Queued(TaskId),
    /// Install requested for a package that is already installed
    AlreadyInstalled,
}

impl Engine {
    /// Search every active manager for `query` across the selected categories.
    ///
    /// An empty query clears the search results and returns the installed list.
    pub fn search(&self, query: &str) -> Result<Vec<PackageRecord>> {
        let query = query.trim();
        if query.is_empty() {
            self.write().search_results.clear();
            return Ok(self.installed());
        }

        let active = self.active_managers();
        let managers = self.registry.definitions_for(&active);
        if managers.is_empty() {
            return Err(DeskError::UnknownManager("no active package manager".to_string()));
        }
        if managers.iter().any(|m| m.requires_base) {
            self.require_base("search")?;
        }

        let categories = self.categories();
        let categories: Vec<&str> = if categories.is_empty() {
            vec![""]
        } else {
            categories.iter().map(String::as_str).collect()
        };

        let results = self.run_exclusive(&format!("Search: {}", query), false, || {
            self.log.info(&format!("Searching: {}", query));
            let batches: Vec<Vec<PackageRecord>> = managers
                .par_iter()
                .map(|manager| self.search_manager(manager, query, &categories))
                .collect();
            Ok(merge(batches))
        })?;

        self.write().search_results = results.clone();
        Ok(results)
    }

    /// One manager, every category in order; failures yield no rows.
    fn search_manager(
        &self,
        manager: &ManagerDefinition,
        query: &str,
        categories: &[&str],
    ) -> Vec<PackageRecord> {
        let Some(template) = manager.template(Operation::Search) else {
            crate::ui::verbose(&format!("{} has no search template", manager.id));
            return Vec::new();
        };
        let batches = categories.iter().filter_map(|category| {
            let fragment = if category.is_empty() {
                None
            } else {
                render_opt(
                    manager.category_flag.as_deref(),
                    &TemplateValues::new().set("category", *category),
                )
            };
            let command = render(
                template,
                &TemplateValues::new()
                    .set("query", query)
                    .set("category", fragment.as_deref()),
            );
            self.query_output(manager, &command)
        });
        merge(batches)
    }

    /// Re-list installed packages of every runnable active manager.
    pub fn refresh_installed(&self) -> Result<Vec<PackageRecord>> {
        let active = self.active_managers();
        let base_present = self.base_present();
        let runnable: Vec<&ManagerDefinition> = self
            .registry
            .definitions_for(&active)
            .into_iter()
            .filter(|m| !(m.requires_base && !base_present))
            .collect();
        if runnable.is_empty() {
            self.write().installed.clear();
            return Ok(Vec::new());
        }

        let installed = self.run_exclusive("Sync installed list", true, || {
            let batches: Vec<Vec<PackageRecord>> = runnable
                .par_iter()
                .filter_map(|manager| {
                    let command = render_opt(
                        manager.template(Operation::List),
                        &TemplateValues::new(),
                    )?;
                    self.query_output(manager, &command)
                })
                .collect();
            Ok(merge(batches))
        })?;

        self.write().installed = installed.clone();
        Ok(installed)
    }

    fn query_output(&self, manager: &ManagerDefinition, command: &str) -> Option<Vec<PackageRecord>> {
        match self.run_for(Some(manager), command, true) {
            Ok(output) => Some(parse_manager_output(manager, &output.stdout)),
            Err(e) => {
                self.log.error(&format!("[{}] {}", manager.display_label(), e));
                None
            }
        }
    }

    pub fn installed(&self) -> Vec<PackageRecord> {
        self.read().installed.clone()
    }

    pub fn search_results(&self) -> Vec<PackageRecord> {
        self.read().search_results.clone()
    }

    pub fn is_installed(&self, target: &PackageTarget) -> bool {
        self.read().installed.iter().any(|record| target.matches(record))
    }

    /// Queue an install; a no-op when the package is already installed.
    pub fn install(self: &Arc<Self>, target: &PackageTarget) -> Result<Submission> {
        if self.is_installed(target) {
            self.log.info(&format!(
                "{} is already installed",
                target.display_name()
            ));
            return Ok(Submission::AlreadyInstalled);
        }
        self.queue_package_op(target, Operation::Install, "Install")
    }

    pub fn uninstall(self: &Arc<Self>, target: &PackageTarget) -> Result<Submission> {
        self.queue_package_op(target, Operation::Uninstall, "Uninstall")
    }

    fn queue_package_op(
        self: &Arc<Self>,
        target: &PackageTarget,
        operation: Operation,
        verb: &str,
    ) -> Result<Submission> {
        let manager = self.manager_for(target)?.clone();
        if manager.requires_base {
            self.require_base(&format!("{} apps", verb.to_lowercase()))?;
        }
        let command = self.package_command(&manager, target, operation)?;

        let name = target.display_name().to_string();
        let label = format!("[{}] {}: {}", manager.display_label(), verb, name);
        let engine = Arc::clone(self);
        let verb = verb.to_string();
        let id = self.queue.enqueue(label, move || {
            engine
                .log
                .info(&format!("{} ({}): {}", verb, manager.display_label(), name));
            engine.run_checked(Some(&manager), &command)?;
            engine.refresh_installed()?;
            Ok(())
        })?;
        Ok(Submission::Queued(id))
    }

    /// Whether the manager's update check lists the target.
    pub fn check_update(&self, target: &PackageTarget) -> Result<bool> {
        let manager = self.manager_for(target)?;
        if manager.requires_base {
            self.require_base("check for updates")?;
        }
        let command = self.package_command(manager, target, Operation::Check)?;

        self.run_exclusive(&format!("Check update: {}", target.display_name()), false, || {
            let output = self.run_for(Some(manager), &command, true)?;
            let pending = parse_manager_output(manager, &output.stdout);
            let mut probe = target.clone();
            probe.manager = Some(manager.id.clone());
            Ok(pending.iter().any(|record| probe.matches(record)))
        })
    }

    pub(crate) fn manager_for(&self, target: &PackageTarget) -> Result<&ManagerDefinition> {
        if let Some(id) = &target.manager
            && self.registry.resolve(id).is_none()
        {
            return Err(DeskError::UnknownManager(id.clone()));
        }
        let active = self.active_managers();
        self.registry
            .manager_for(target, &active)
            .ok_or_else(|| DeskError::UnknownManager("no package manager selected".to_string()))
    }

    /// Render a per-package template or report the operation as unsupported.
    ///
    /// Every value the template references must pass the shell-safety check.
    pub(crate) fn package_command(
        &self,
        manager: &ManagerDefinition,
        target: &PackageTarget,
        operation: Operation,
    ) -> Result<String> {
        let Some(template) = manager.template(operation) else {
            let err = DeskError::Unsupported {
                manager: manager.display_label().to_string(),
                operation: operation.to_string(),
            };
            self.log.error(&err.to_string());
            return Err(err);
        };
        let name = target.display_name();
        let id = target.identifier();
        for (token, value) in [("name", name), ("id", id)] {
            if template.contains(&format!("{{{}}}", token)) {
                validate_package_name(value).inspect_err(|e| {
                    self.log.error(&format!("Refusing to run {}: {}", operation, e));
                })?;
            }
        }

        let values = TemplateValues::new().set("name", name).set("id", id);
        Ok(render(template, &values))
    }
}
