//! Command template rendering.
//!
//! Templates reference values as `{token}`. Supplied tokens are substituted
//! (absent values become empty), unknown tokens pass through verbatim, and the
//! result has whitespace runs collapsed and ends trimmed.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\s{2,}").expect("static whitespace pattern")
});

/// Named values for template rendering. Later entries win.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues<'a> {
    values: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> TemplateValues<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'a str, value: impl Into<Option<&'a str>>) -> Self {
        self.values.push((key, value.into()));
        self
    }

    /// `Some(None)` means the token is known but has no value.
    fn lookup(&self, key: &str) -> Option<Option<&'a str>> {
        self.values
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Render a template. Substitution is single pass, so values are never re-expanded.
pub fn render(template: &str, values: &TemplateValues<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['}', '{']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let token = &after[..close];
                match values.lookup(token) {
                    Some(value) => out.push_str(value.unwrap_or("")),
                    None => {
                        out.push('{');
                        out.push_str(token);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    collapse_whitespace(&out)
}

/// Render an optional template; `None` means the operation is unsupported.
pub fn render_opt(template: Option<&str>, values: &TemplateValues<'_>) -> Option<String> {
    template.map(|t| render(t, values))
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
