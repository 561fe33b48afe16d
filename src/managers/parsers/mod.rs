//! Output parsers: raw manager stdout into package rows.
//!
//! Every parser fails soft. Unrecognized lines are skipped and whatever rows
//! matched are returned; an empty result is valid.

pub mod columns;
pub mod delimited;
pub mod token;

use crate::core::types::PackageRecord;
use crate::managers::config::{ManagerDefinition, ParserKind};

/// A parsed row before it is tagged with its manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub name: String,
    pub id: Option<String>,
}

impl ParsedRow {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: None,
        }
    }

    pub fn into_record(self, manager: &str) -> PackageRecord {
        PackageRecord::new(self.name, self.id, manager)
    }
}

/// Trimmed, non-empty lines.
pub fn split_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn parse_rows(kind: ParserKind, output: &str) -> Vec<ParsedRow> {
    let lines = split_lines(output);
    match kind {
        ParserKind::Token => token::parse_tokens(&lines),
        ParserKind::Columns => columns::parse_columns(&lines),
        ParserKind::Delimited => delimited::parse_delimited(&lines),
    }
}

/// Parse a manager's output and tag every row with the manager id.
pub fn parse_manager_output(manager: &ManagerDefinition, output: &str) -> Vec<PackageRecord> {
    parse_rows(manager.parser, output)
        .into_iter()
        .map(|row| row.into_record(&manager.id))
        .collect()
}
