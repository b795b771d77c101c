use crate::options::JobOption;
use crate::step::WorkflowStep;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a workflow's steps are allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Local,
    Remote,
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Local
    }
}

/// What fires a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTrigger {
    OnStart,
    OnSuccess,
    OnFailure,
    OnRetryableFail,
    AverageDurationExceeded,
}

/// How a notification is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Webhook,
    DingtalkWebhook,
}

/// One notification rule attached to a workflow. `extensions` carries the
/// delivery-specific configuration, free-form per notification type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub trigger: NotificationTrigger,
    pub notification_type: NotificationType,
    #[serde(default)]
    pub extensions: Map<String, Value>,
}

/// The full workflow attached to a job: run-time parameters, ordered steps,
/// scheduling, node placement and notification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub retry: u32,

    #[serde(default)]
    pub schedule_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_crontab: Option<String>,
    #[serde(default = "default_timezone")]
    pub schedule_timezone: String,

    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_filter_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_exclude_expression: Option<String>,

    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub options: Vec<JobOption>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// A job with its workflow, as persisted and loaded through the
/// [`crate::run::JobStore`] collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub workflow: Workflow,
}
