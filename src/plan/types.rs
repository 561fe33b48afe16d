use crate::error::{DeskError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Ordered list of provisioning steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub action: StepAction,
}

/// Closed set of step kinds. Legacy tag names are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepAction {
    #[serde(alias = "scoop-bucket")]
    BucketAdd {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    #[serde(alias = "scoop-install")]
    AppInstall { name: String },
    #[serde(alias = "package-source")]
    SourceConfig(SourceConfig),
    #[serde(alias = "command")]
    RawCommand {
        /// Display title
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        commands: Option<Vec<String>>,
    },
    /// Any other `type`; loads with the plan and fails when run
    #[serde(other)]
    Unknown,
}

/// Source operation, matched case-insensitively. Unrecognized actions are
/// kept verbatim so the step fails when run instead of when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceAction {
    #[default]
    Add,
    Remove,
    Replace,
    Reset,
    Other(String),
}

impl From<String> for SourceAction {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "add" | "" => SourceAction::Add,
            "remove" => SourceAction::Remove,
            "replace" => SourceAction::Replace,
            "reset" => SourceAction::Reset,
            _ => SourceAction::Other(value),
        }
    }
}

impl From<SourceAction> for String {
    fn from(action: SourceAction) -> Self {
        match action {
            SourceAction::Add => "add".to_string(),
            SourceAction::Remove => "remove".to_string(),
            SourceAction::Replace => "replace".to_string(),
            SourceAction::Reset => "reset".to_string(),
            SourceAction::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub manager: String,
    #[serde(default)]
    pub action: SourceAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Done,
    Error,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Done => "done",
            StepStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl StepAction {
    pub fn kind(&self) -> &'static str {
        match self {
            StepAction::BucketAdd { .. } => "bucket-add",
            StepAction::AppInstall { .. } => "app-install",
            StepAction::SourceConfig(_) => "source-config",
            StepAction::RawCommand { .. } => "raw-command",
            StepAction::Unknown => "unknown",
        }
    }
}

impl PlanStep {
    pub fn new(action: StepAction) -> Self {
        Self {
            description: None,
            action,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Short label for logs: the step's name when it has one, else its kind.
    pub fn title(&self) -> String {
        match &self.action {
            StepAction::BucketAdd { name, .. } | StepAction::AppInstall { name } => {
                format!("{} {}", self.action.kind(), name)
            }
            StepAction::SourceConfig(source) => match &source.name {
                Some(name) => format!("{} {} {}", self.action.kind(), source.manager, name),
                None => format!("{} {}", self.action.kind(), source.manager),
            },
            StepAction::RawCommand { name: Some(name), .. } => name.clone(),
            StepAction::RawCommand { .. } | StepAction::Unknown => {
                self.action.kind().to_string()
            }
        }
    }
}

impl Plan {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Custom provisioning plan")
    }

    pub fn pending_statuses(&self) -> Vec<StepStatus> {
        vec![StepStatus::Pending; self.steps.len()]
    }

    /// Parse a plan document, requiring a `steps` array.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DeskError::InvalidStep(format!("plan is not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if !value.get("steps").is_some_and(Value::is_array) {
            return Err(DeskError::InvalidStep(
                "plan must contain a 'steps' array".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DeskError::InvalidStep(e.to_string()))
    }
}

/// Starter plan shown by `plan template`.
pub fn template_plan() -> Plan {
    Plan {
        title: Some("New machine setup".to_string()),
        steps: vec![
            PlanStep::new(StepAction::BucketAdd {
                name: "extras".to_string(),
                url: None,
            })
            .described("Add the extras bucket"),
            PlanStep::new(StepAction::SourceConfig(SourceConfig {
                manager: "winget".to_string(),
                action: SourceAction::Replace,
                name: Some("winget".to_string()),
                url: None,
                arg: Some("https://cdn.winget.microsoft.com/cache".to_string()),
                source_type: None,
                priority: None,
            }))
            .described("Point the winget source at a mirror"),
            PlanStep::new(StepAction::AppInstall {
                name: "git".to_string(),
            })
            .described("Install Git"),
            PlanStep::new(StepAction::RawCommand {
                name: Some("Install Node.js (fnm)".to_string()),
                command: Some("winget install Schniz.fnm".to_string()),
                commands: None,
            })
            .described("Run any other command line installer"),
        ],
    }
}
