use super::ParsedRow;

pub const DELIMITER: char = '|';

/// Case-insensitive substrings identifying the manager's own packages
const SELF_REFERENCES: &[&str] = &["chocolatey"];

/// Parse `name|version|...` rows from limit-output listings.
///
/// Every non-empty line contributes its first field, so a bare name with no
/// delimiter is still a package.
pub fn parse_delimited(lines: &[&str]) -> Vec<ParsedRow> {
    lines
        .iter()
        .copied()
        .filter(|line| !is_self_reference(line))
        .filter_map(|line| {
            let name = line.split(DELIMITER).next()?.trim();
            (!name.is_empty()).then(|| ParsedRow::named(name))
        })
        .collect()
}

fn is_self_reference(line: &str) -> bool {
    let lower = line.to_lowercase();
    SELF_REFERENCES.iter().any(|s| lower.contains(s))
}
