//! Bucket management and base manager provisioning.

use super::Engine;
use crate::core::types::{Bucket, default_buckets};
use crate::error::{DeskError, Result};
use crate::managers::parsers::split_lines;
use crate::managers::{ManagerDefinition, Operation, TemplateValues, render_opt};
use crate::utils::sanitize::{validate_bucket_url, validate_package_name};

const GIT_EXECUTABLE: &str = "git";

impl Engine {
    pub fn buckets(&self) -> Vec<Bucket> {
        self.read().buckets.clone()
    }

    /// Register a bucket with the base manager and record it in configuration.
    pub fn add_bucket(&self, name: &str, url: Option<&str>) -> Result<()> {
        let name = name.trim();
        if !Bucket::is_valid_name(name) {
            return Err(DeskError::InvalidInput(format!("invalid bucket name '{}'", name)));
        }
        validate_package_name(name)?;
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        if let Some(url) = url {
            validate_bucket_url(url)?;
        }
        let manager = self.bucket_preconditions("add buckets")?;
        let command = self.bucket_command(
            manager,
            Operation::BucketAdd,
            &TemplateValues::new().set("name", name).set("url", url),
        )?;

        self.run_exclusive(&format!("Add bucket: {}", name), true, || {
            self.log.info(&format!("Adding bucket: {}", name));
            self.run_checked(Some(manager), &command)?;
            let bucket = Bucket::new(name, url.map(str::to_string));
            self.store.update(move |config| config.upsert_bucket(bucket))?;
            self.refresh_buckets()?;
            Ok(())
        })
    }

    pub fn remove_bucket(&self, name: &str) -> Result<()> {
        let name = name.trim();
        validate_package_name(name)?;
        let manager = self.bucket_preconditions("remove buckets")?;
        let command = self.bucket_command(
            manager,
            Operation::BucketRemove,
            &TemplateValues::new().set("name", name),
        )?;

        self.run_exclusive(&format!("Remove bucket: {}", name), false, || {
            self.log.info(&format!("Removing bucket: {}", name));
            self.run_checked(Some(manager), &command)?;
            self.store.update(|config| config.remove_bucket(name))?;
            self.refresh_buckets()?;
            Ok(())
        })
    }

    /// Sync the bucket list from the base manager, keeping configured URLs.
    ///
    /// Without the base manager, or when listing fails, the configured list is
    /// used as is.
    pub fn refresh_buckets(&self) -> Result<Vec<Bucket>> {
        let listing = match self.registry.base_manager() {
            Some(manager) if self.base_present() => render_opt(
                manager.template(Operation::BucketList),
                &TemplateValues::new(),
            )
            .map(|command| (manager, command)),
            _ => None,
        };
        let Some((manager, command)) = listing else {
            let buckets = self.load_config()?.buckets;
            self.write().buckets = buckets.clone();
            return Ok(buckets);
        };

        self.run_exclusive("Sync bucket list", true, || {
            let output = match self.run_for(Some(manager), &command, true)?.check(&command) {
                Ok(output) => output,
                Err(e) => {
                    self.log.error(&format!("{}; keeping configured buckets", e));
                    let buckets = self.load_config()?.buckets;
                    self.write().buckets = buckets.clone();
                    return Ok(buckets);
                }
            };
            let listed = parse_bucket_names(&output.stdout);
            let config = self.store.update(|config| {
                let merged: Vec<Bucket> = listed
                    .iter()
                    .map(|name| {
                        config
                            .buckets
                            .iter()
                            .find(|b| &b.name == name)
                            .cloned()
                            .unwrap_or_else(|| Bucket::named(name.as_str()))
                    })
                    .collect();
                config.buckets = merged;
            })?;
            self.write().buckets = config.buckets.clone();
            Ok(config.buckets)
        })
    }

    /// Add every default bucket, stopping at the first failure.
    pub fn add_default_buckets(&self) -> Result<()> {
        self.require_base("add default buckets")?;
        self.run_exclusive("Add default buckets", false, || {
            default_buckets()
                .iter()
                .try_for_each(|bucket| self.add_bucket(&bucket.name, bucket.url.as_deref()))
        })
    }

    /// Install the base manager with its provisioning template, then re-detect.
    pub fn provision_base_manager(&self) -> Result<bool> {
        let manager = self.registry.base_manager().ok_or_else(|| {
            DeskError::UnknownManager(crate::managers::BASE_MANAGER_ID.to_string())
        })?;
        let command = self.bucket_command(manager, Operation::Provision, &TemplateValues::new())?;

        self.run_exclusive("Install Scoop", true, || {
            self.log.info("Installing Scoop...");
            match self.run_checked(Some(manager), &command) {
                Ok(_) => {
                    self.log.info("Scoop installation finished");
                    Ok(self.detect_base_manager())
                }
                Err(e) => {
                    self.log.error("Scoop installation failed; see the log for details");
                    Err(e)
                }
            }
        })
    }

    fn bucket_preconditions(&self, action: &str) -> Result<&ManagerDefinition> {
        self.require_base(action)?;
        if !self.probe.has_executable(GIT_EXECUTABLE) {
            let message = format!("git was not found on PATH; cannot {}", action);
            self.log.error(&message);
            return Err(DeskError::PreconditionFailed(message));
        }
        self.registry.base_manager().ok_or_else(|| {
            DeskError::UnknownManager(crate::managers::BASE_MANAGER_ID.to_string())
        })
    }

    fn bucket_command(
        &self,
        manager: &ManagerDefinition,
        operation: Operation,
        values: &TemplateValues<'_>,
    ) -> Result<String> {
        render_opt(manager.template(operation), values).ok_or_else(|| DeskError::Unsupported {
            manager: manager.display_label().to_string(),
            operation: operation.to_string(),
        })
    }
}

/// First token of every line that names a bucket.
pub(crate) fn parse_bucket_names(output: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in split_lines(output) {
        let Some(first) = line.split_whitespace().next() else {
            continue;
        };
        if Bucket::is_valid_name(first) && !names.iter().any(|n| n == first) {
            names.push(first.to_string());
        }
    }
    names
}
