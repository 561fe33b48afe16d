use crate::core::types::PackageTarget;
use crate::managers::config::{ExecEncoding, ManagerDefinition, ManagerOverride, ParserKind};

/// Identifier of the bucket-based base manager.
pub const BASE_MANAGER_ID: &str = "scoop";

/// Environment variable the base manager reads its storage root from.
pub const BASE_ROOT_ENV: &str = "SCOOP";

/// Built-in manager definitions, in display order.
pub fn builtin_managers() -> Vec<ManagerDefinition> {
    let mut scoop = ManagerDefinition::new(BASE_MANAGER_ID, "Scoop");
    scoop.requires_base = true;
    scoop.search = Some("scoop search {query}".to_string());
    scoop.list = Some("scoop list".to_string());
    scoop.check = Some("scoop status".to_string());
    scoop.install = Some("scoop install {name}".to_string());
    scoop.uninstall = Some("scoop uninstall {name}".to_string());
    scoop.bucket_add = Some("scoop bucket add {name} {url}".to_string());
    scoop.bucket_remove = Some("scoop bucket rm {name}".to_string());
    scoop.bucket_list = Some("scoop bucket list".to_string());
    scoop.provision = Some(
        "Set-ExecutionPolicy -Scope Process Bypass -Force; iwr -useb get.scoop.sh | iex"
            .to_string(),
    );
    scoop.parser = ParserKind::Token;

    let mut winget = ManagerDefinition::new("winget", "Winget");
    winget.search = Some(
        "winget search --name \"{query}\" --accept-source-agreements {category}".to_string(),
    );
    winget.list = Some("winget list --accept-source-agreements".to_string());
    winget.check = Some("winget upgrade --accept-source-agreements".to_string());
    winget.install = Some("winget install --id \"{id}\" --accept-source-agreements".to_string());
    winget.uninstall = Some("winget uninstall --id \"{id}\"".to_string());
    winget.category_flag = Some("--tag \"{category}\"".to_string());
    winget.parser = ParserKind::Columns;
    winget.encoding = ExecEncoding::Utf8;

    let mut choco = ManagerDefinition::new("choco", "Chocolatey");
    choco.search = Some("choco search {query} --limit-output".to_string());
    choco.list = Some("choco list --local-only --limit-output".to_string());
    choco.check = Some("choco outdated --limit-output".to_string());
    choco.install = Some("choco install {name} -y".to_string());
    choco.uninstall = Some("choco uninstall {name} -y".to_string());
    choco.parser = ParserKind::Delimited;

    vec![scoop, winget, choco]
}

/// Merged, immutable set of manager definitions.
#[derive(Debug, Clone, Default)]
pub struct ManagerRegistry {
    managers: Vec<ManagerDefinition>,
}

impl ManagerRegistry {
    /// Merge user overrides over defaults.
    ///
    /// Ids are lower-cased; an override with a known id merges field by field,
    /// an unknown id is appended as a new manager, an entry without id is skipped.
    pub fn register(defaults: Vec<ManagerDefinition>, overrides: &[ManagerOverride]) -> Self {
        let mut managers: Vec<ManagerDefinition> = Vec::with_capacity(defaults.len());
        for mut def in defaults {
            def.id = def.id.to_lowercase();
            if let Some(existing) = managers.iter_mut().find(|m| m.id == def.id) {
                *existing = def;
            } else {
                managers.push(def);
            }
        }

        for over in overrides {
            let Some(id) = over.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
                continue;
            };
            let id = id.to_lowercase();
            match managers.iter_mut().find(|m| m.id == id) {
                Some(existing) => existing.apply(over),
                None => managers.push(over.clone().into_definition(id)),
            }
        }

        Self { managers }
    }

    pub fn with_builtins(overrides: &[ManagerOverride]) -> Self {
        Self::register(builtin_managers(), overrides)
    }

    pub fn resolve(&self, id: &str) -> Option<&ManagerDefinition> {
        let id = id.trim().to_lowercase();
        self.managers.iter().find(|m| m.id == id)
    }

    pub fn first(&self) -> Option<&ManagerDefinition> {
        self.managers.first()
    }

    pub fn base_manager(&self) -> Option<&ManagerDefinition> {
        self.resolve(BASE_MANAGER_ID)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagerDefinition> {
        self.managers.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.managers.iter().map(|m| m.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Normalize a requested active set.
    ///
    /// Lower-cases, drops unknown and duplicate ids, and falls back to the first
    /// registered manager so the result is never empty while any manager exists.
    pub fn active_set<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        let mut active: Vec<String> = Vec::new();
        for id in requested {
            let id = id.as_ref().trim().to_lowercase();
            if self.resolve(&id).is_some() && !active.contains(&id) {
                active.push(id);
            }
        }
        if active.is_empty()
            && let Some(first) = self.first()
        {
            active.push(first.id.clone());
        }
        active
    }

    /// Definitions for an already normalized active set.
    pub fn definitions_for(&self, ids: &[String]) -> Vec<&ManagerDefinition> {
        ids.iter().filter_map(|id| self.resolve(id)).collect()
    }

    /// The target's own manager when it resolves, else the first active one.
    pub fn manager_for(
        &self,
        target: &PackageTarget,
        active: &[String],
    ) -> Option<&ManagerDefinition> {
        target
            .manager
            .as_deref()
            .and_then(|id| self.resolve(id))
            .or_else(|| active.first().and_then(|id| self.resolve(id)))
            .or_else(|| self.first())
    }
}

#[cfg(test)]
mod tests;
