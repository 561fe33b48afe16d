use serde::{Deserialize, Serialize};
use std::fmt;

/// One package as known to one manager.
///
/// Records are rebuilt on every search/list call and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    /// Manager-specific identifier when it differs from the name (winget ids)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub manager: String,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, id: Option<String>, manager: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            manager: manager.into(),
        }
    }

    /// Identifier used for routing: the id when present, else the name.
    pub fn identifier(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Deduplication key `manager:identifier`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.manager, self.identifier())
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) if id != &self.name => write!(f, "{} ({}) [{}]", self.name, id, self.manager),
            _ => write!(f, "{} [{}]", self.name, self.manager),
        }
    }
}

/// Package an intent refers to; the manager is optional and falls back to the
/// first active manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTarget {
    pub name: String,
    pub id: Option<String>,
    pub manager: Option<String>,
}

impl PackageTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            manager: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Value for the `{id}` placeholder: the id, else the name.
    pub fn identifier(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.identifier()
        } else {
            &self.name
        }
    }

    /// Whether an installed record refers to this package.
    ///
    /// Names or ids must match; when both sides name a manager they must agree.
    pub fn matches(&self, record: &PackageRecord) -> bool {
        if let Some(manager) = &self.manager
            && !record.manager.is_empty()
            && manager != &record.manager
        {
            return false;
        }
        if !self.name.is_empty() && record.name == self.name {
            return true;
        }
        match (&self.id, &record.id) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

impl From<&PackageRecord> for PackageTarget {
    fn from(record: &PackageRecord) -> Self {
        Self {
            name: record.name.clone(),
            id: record.id.clone(),
            manager: Some(record.manager.clone()),
        }
    }
}

/// A named source registered with the base manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Bucket {
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Rejects empty names, the `Name` table header and separator dashes.
    pub fn is_valid_name(name: &str) -> bool {
        let trimmed = name.trim();
        !trimmed.is_empty()
            && !trimmed.eq_ignore_ascii_case("name")
            && !trimmed.chars().all(|c| c == '-')
    }
}

/// Buckets added by "add default buckets" and used for a fresh configuration.
pub fn default_buckets() -> Vec<Bucket> {
    ["main", "extras", "versions", "java", "games", "nirsoft", "nonportable"]
        .into_iter()
        .map(Bucket::named)
        .collect()
}

#[cfg(test)]
mod tests;
