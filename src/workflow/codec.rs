//! The single encode/decode pair for every JSON-in-a-string boundary field.
//!
//! At the editing boundary `extension`, notification `extensions` and
//! `json_schema` travel as JSON-encoded strings (a text area is the editing
//! widget for all three). Every call site goes through [`encode_json_field`]
//! and [`decode_json_field`] rather than parsing ad hoc, so the canonical
//! string form is defined in exactly one place.

use super::model::{Notification, Workflow};
use crate::error::CodecError;
use crate::options::JobOption;
use crate::step::{normalize, StepType, WorkflowStep};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical string form of a structured boundary field: compact JSON.
pub fn encode_json_field(value: &Value) -> String {
    value.to_string()
}

/// Inverse of [`encode_json_field`].
pub fn decode_json_field(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

/// A step as held by the editor: the extension is its canonical JSON string
/// (or bare code for the script-like step types).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEdit {
    pub order: u32,
    pub step_type: StepType,
    #[serde(default)]
    pub extension: String,
}

/// A notification rule as held by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEdit {
    pub trigger: super::NotificationTrigger,
    pub notification_type: super::NotificationType,
    #[serde(default)]
    pub extensions: String,
}

/// An option as held by the editor: the schema document moves out of the wire
/// field into its canonical JSON-string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEdit {
    #[serde(flatten)]
    pub option: JobOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema_text: Option<String>,
}

/// A workflow in its editing shape. Produced from a loaded [`Workflow`] and
/// converted back on submit; the round-trip is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdit {
    pub name: String,
    pub timeout: Option<u32>,
    pub retry: u32,
    pub schedule_enabled: bool,
    pub schedule_crontab: Option<String>,
    pub schedule_timezone: String,
    pub node_type: super::NodeType,
    pub node_filter_expression: Option<String>,
    pub node_exclude_expression: Option<String>,
    pub notifications: Vec<NotificationEdit>,
    pub options: Vec<OptionEdit>,
    pub steps: Vec<StepEdit>,
}

impl WorkflowEdit {
    /// Re-serializes a loaded workflow's structured sub-objects into their
    /// canonical JSON-string editing form.
    pub fn from_wire(workflow: &Workflow) -> Self {
        WorkflowEdit {
            name: workflow.name.clone(),
            timeout: workflow.timeout,
            retry: workflow.retry,
            schedule_enabled: workflow.schedule_enabled,
            schedule_crontab: workflow.schedule_crontab.clone(),
            schedule_timezone: workflow.schedule_timezone.clone(),
            node_type: workflow.node_type,
            node_filter_expression: workflow.node_filter_expression.clone(),
            node_exclude_expression: workflow.node_exclude_expression.clone(),
            notifications: workflow
                .notifications
                .iter()
                .map(|n| NotificationEdit {
                    trigger: n.trigger,
                    notification_type: n.notification_type,
                    extensions: encode_json_field(&Value::Object(n.extensions.clone())),
                })
                .collect(),
            options: workflow
                .options
                .iter()
                .map(|o| {
                    let json_schema_text = o.json_schema.as_ref().map(encode_json_field);
                    let mut option = o.clone();
                    option.json_schema = None;
                    OptionEdit {
                        option,
                        json_schema_text,
                    }
                })
                .collect(),
            steps: workflow
                .steps
                .iter()
                .map(|s| StepEdit {
                    order: s.order,
                    step_type: s.step_type,
                    extension: encode_json_field(&Value::Object(s.extension.0.clone())),
                })
                .collect(),
        }
    }

    /// Converts the editing shape back to the wire shape, normalizing every
    /// step. Fails fast on the first bad field, so there is no partial save.
    pub fn into_wire(self) -> Result<Workflow, CodecError> {
        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let raw = Value::String(step.extension.clone());
            let extension = normalize(step.step_type, Some(&raw), step.order)?;
            steps.push(WorkflowStep {
                order: step.order,
                step_type: step.step_type,
                extension,
            });
        }

        let mut notifications = Vec::with_capacity(self.notifications.len());
        for (index, n) in self.notifications.iter().enumerate() {
            let extensions = if n.extensions.trim().is_empty() {
                Map::new()
            } else {
                match decode_json_field(&n.extensions) {
                    Ok(Value::Object(map)) => map,
                    _ => return Err(CodecError::BadNotification { index }),
                }
            };
            notifications.push(Notification {
                trigger: n.trigger,
                notification_type: n.notification_type,
                extensions,
            });
        }

        let mut options = Vec::with_capacity(self.options.len());
        for edit in self.options {
            let mut option = edit.option;
            option.json_schema = match edit.json_schema_text.as_deref() {
                Some(text) => {
                    Some(
                        decode_json_field(text).map_err(|e| CodecError::BadOptionSchema {
                            name: option.name.clone(),
                            detail: e.to_string(),
                        })?,
                    )
                }
                None => None,
            };
            options.push(option);
        }

        Ok(Workflow {
            name: self.name,
            timeout: self.timeout,
            retry: self.retry,
            schedule_enabled: self.schedule_enabled,
            schedule_crontab: self.schedule_crontab,
            schedule_timezone: self.schedule_timezone,
            node_type: self.node_type,
            node_filter_expression: self.node_filter_expression,
            node_exclude_expression: self.node_exclude_expression,
            notifications,
            options,
            steps,
        })
    }
}
