use super::ParsedRow;
use regex::Regex;
use std::sync::LazyLock;

static COLUMN_GAP: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\s{2,}").expect("static column pattern")
});

/// Case-insensitive fragments of legal notices printed around results
const LEGAL_NOTICES: &[&str] = &[
    "terms of transaction",
    "source requires",
    "aka.ms/microsoft-store-terms-of-transaction",
    "地理区域",
];

/// First-column values of status rows
const STATUS_ROWS: &[&str] = &["Installed", "已安装"];

/// Parse winget-style tables: columns split on runs of 2+ spaces,
/// first column is the name, second the id.
pub fn parse_columns(lines: &[&str]) -> Vec<ParsedRow> {
    lines
        .iter()
        .copied()
        .filter_map(|line| {
            let parts: Vec<&str> = COLUMN_GAP
                .split(line)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            if parts.len() < 2 || is_header_or_separator(parts[0]) {
                return None;
            }
            if STATUS_ROWS.contains(&parts[0]) || is_legal_notice(&parts) {
                return None;
            }
            Some(ParsedRow {
                name: parts[0].to_string(),
                id: Some(parts[1].to_string()),
            })
        })
        .collect()
}

fn is_header_or_separator(first: &str) -> bool {
    first == "Name" || first == "名称" || first == "-" || first.starts_with("---")
}

fn is_legal_notice(parts: &[&str]) -> bool {
    let joined = parts.join(" ").to_lowercase();
    LEGAL_NOTICES.iter().any(|notice| joined.contains(notice))
}

#[cfg(test)]
mod tests;
