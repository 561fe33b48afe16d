use super::ParsedRow;

/// First tokens that mark banner, header or status lines
const NOISE_FIRST_TOKENS: &[&str] = &["Results", "Name", "Installed", "WARN", "ERROR", "INFO"];

/// Case-insensitive substrings of status lines
const NOISE_SUBSTRINGS: &[&str] = &["already installed", "is up to date", "everything is ok"];

/// Parse scoop-style output: the first whitespace token of each line is the name.
pub fn parse_tokens(lines: &[&str]) -> Vec<ParsedRow> {
    lines
        .iter()
        .copied()
        .filter(|line| !is_noise(line))
        .filter_map(|line| line.split_whitespace().next())
        .map(ParsedRow::named)
        .collect()
}

fn is_noise(line: &str) -> bool {
    if line.starts_with("---") {
        return true;
    }
    let first = line.split_whitespace().next().unwrap_or_default();
    if NOISE_FIRST_TOKENS
        .iter()
        .any(|marker| first.trim_end_matches(':') == *marker)
    {
        return true;
    }
    let lower = line.to_lowercase();
    NOISE_SUBSTRINGS.iter().any(|s| lower.contains(s))
}

#[cfg(test)]
mod tests;
