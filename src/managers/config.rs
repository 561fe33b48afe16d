use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations a manager can declare a command template for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    List,
    Check,
    Install,
    Uninstall,
    BucketAdd,
    BucketRemove,
    BucketList,
    Provision,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::List => "list",
            Operation::Check => "check",
            Operation::Install => "install",
            Operation::Uninstall => "uninstall",
            Operation::BucketAdd => "bucket-add",
            Operation::BucketRemove => "bucket-remove",
            Operation::BucketList => "bucket-list",
            Operation::Provision => "provision",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which output parser turns a manager's stdout into package rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParserKind {
    /// First whitespace token per line (scoop)
    #[default]
    Token,
    /// Columns separated by runs of 2+ spaces (winget)
    Columns,
    /// Fields separated by a single `|` (choco --limit-output)
    Delimited,
}

impl From<&str> for ParserKind {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "winget" | "columns" => ParserKind::Columns,
            "choco" | "chocolatey" | "delimited" => ParserKind::Delimited,
            _ => ParserKind::Token,
        }
    }
}

impl From<String> for ParserKind {
    fn from(value: String) -> Self {
        ParserKind::from(value.as_str())
    }
}

impl From<ParserKind> for String {
    fn from(kind: ParserKind) -> Self {
        match kind {
            ParserKind::Token => "token",
            ParserKind::Columns => "columns",
            ParserKind::Delimited => "delimited",
        }
        .to_string()
    }
}

/// Text encoding the manager emits on stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecEncoding {
    #[default]
    Default,
    /// Force the shell's output encoding to UTF-8 before running
    Utf8,
    /// Output arrives as UTF-16 little endian
    Utf16le,
}

/// A package manager exposed through command templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDefinition {
    /// Lower-case identifier, unique within the registry
    pub id: String,

    pub label: String,

    /// Needs the base manager (scoop) to be present
    #[serde(default, alias = "requiresScoop")]
    pub requires_base: bool,

    /// `{query}` and `{category}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,

    /// Lists packages with pending updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,

    /// `{name}` and `{id}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstall: Option<String>,

    /// Fragment rendered with `{category}` and spliced into `search`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_flag: Option<String>,

    /// `{name}` and `{url}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_add: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_remove: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_list: Option<String>,

    /// Installs the manager itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision: Option<String>,

    #[serde(default, rename = "parse")]
    pub parser: ParserKind,

    #[serde(default)]
    pub encoding: ExecEncoding,
}

impl ManagerDefinition {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            label: label.to_string(),
            requires_base: false,
            search: None,
            list: None,
            check: None,
            install: None,
            uninstall: None,
            category_flag: None,
            bucket_add: None,
            bucket_remove: None,
            bucket_list: None,
            provision: None,
            parser: ParserKind::Token,
            encoding: ExecEncoding::Default,
        }
    }

    pub fn template(&self, operation: Operation) -> Option<&str> {
        match operation {
            Operation::Search => self.search.as_deref(),
            Operation::List => self.list.as_deref(),
            Operation::Check => self.check.as_deref(),
            Operation::Install => self.install.as_deref(),
            Operation::Uninstall => self.uninstall.as_deref(),
            Operation::BucketAdd => self.bucket_add.as_deref(),
            Operation::BucketRemove => self.bucket_remove.as_deref(),
            Operation::BucketList => self.bucket_list.as_deref(),
            Operation::Provision => self.provision.as_deref(),
        }
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    /// Shallow merge: every field the override sets replaces ours.
    pub fn apply(&mut self, over: &ManagerOverride) {
        if let Some(label) = &over.label {
            self.label = label.clone();
        }
        if let Some(requires_base) = over.requires_base {
            self.requires_base = requires_base;
        }
        let templates = [
            (&mut self.search, &over.search),
            (&mut self.list, &over.list),
            (&mut self.check, &over.check),
            (&mut self.install, &over.install),
            (&mut self.uninstall, &over.uninstall),
            (&mut self.category_flag, &over.category_flag),
            (&mut self.bucket_add, &over.bucket_add),
            (&mut self.bucket_remove, &over.bucket_remove),
            (&mut self.bucket_list, &over.bucket_list),
            (&mut self.provision, &over.provision),
        ];
        for (slot, value) in templates {
            if value.is_some() {
                *slot = value.clone();
            }
        }
        if let Some(parser) = over.parser {
            self.parser = parser;
        }
        if let Some(encoding) = over.encoding {
            self.encoding = encoding;
        }
    }
}

/// User-declared manager entry from configuration.
///
/// Unset fields leave the merged definition untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, alias = "requiresScoop", skip_serializing_if = "Option::is_none")]
    pub requires_base: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_remove: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision: Option<String>,
    #[serde(default, rename = "parse", skip_serializing_if = "Option::is_none")]
    pub parser: Option<ParserKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<ExecEncoding>,
}

impl ManagerOverride {
    /// A brand-new manager built from an override with no built-in counterpart.
    pub fn into_definition(self, id: String) -> ManagerDefinition {
        let mut definition = ManagerDefinition::new(&id, &id);
        definition.apply(&self);
        definition
    }
}

#[cfg(test)]
mod tests;
