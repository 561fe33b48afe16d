//! Command sequences for source-config steps.

use super::types::{SourceAction, SourceConfig};

/// Render the commands implied by a source-config step.
///
/// Returns `None` when the manager or action is unknown or required
/// parameters are missing. `replace` is remove followed by add; `reset`
/// only exists for winget.
pub fn source_commands(source: &SourceConfig) -> Option<Vec<String>> {
    let name = source.name.as_deref().filter(|n| !n.is_empty());
    match source.manager.to_lowercase().as_str() {
        "winget" => winget_commands(source, name),
        "choco" | "chocolatey" => choco_commands(source, name),
        _ => None,
    }
}

fn winget_commands(source: &SourceConfig, name: Option<&str>) -> Option<Vec<String>> {
    match &source.action {
        SourceAction::Reset => Some(vec!["winget source reset --force".to_string()]),
        SourceAction::Remove => Some(vec![format!("winget source remove -n \"{}\"", name?)]),
        SourceAction::Add | SourceAction::Replace => {
            let name = name?;
            let arg = non_empty(&source.arg).or_else(|| non_empty(&source.url))?;
            let source_type = non_empty(&source.source_type)
                .map(|t| format!(" -t \"{}\"", t))
                .unwrap_or_default();
            let add = format!(
                "winget source add -n \"{}\" -a \"{}\"{} --accept-source-agreements",
                name, arg, source_type
            );
            Some(with_remove(
                &source.action,
                format!("winget source remove -n \"{}\"", name),
                add,
            ))
        }
        SourceAction::Other(_) => None,
    }
}

fn choco_commands(source: &SourceConfig, name: Option<&str>) -> Option<Vec<String>> {
    match &source.action {
        SourceAction::Reset | SourceAction::Other(_) => None,
        SourceAction::Remove => Some(vec![format!("choco source remove -n=\"{}\"", name?)]),
        SourceAction::Add | SourceAction::Replace => {
            let name = name?;
            let url = non_empty(&source.url)?;
            let priority = non_empty(&source.priority)
                .map(|p| format!(" --priority={}", p))
                .unwrap_or_default();
            let add = format!("choco source add -n=\"{}\" -s=\"{}\"{}", name, url, priority);
            Some(with_remove(
                &source.action,
                format!("choco source remove -n=\"{}\"", name),
                add,
            ))
        }
    }
}

fn with_remove(action: &SourceAction, remove: String, add: String) -> Vec<String> {
    if *action == SourceAction::Replace {
        vec![remove, add]
    } else {
        vec![add]
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
