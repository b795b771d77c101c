//! Common test fixtures: schema documents, options and workflows.
use kataform::prelude::*;
use serde_json::{json, Value};

/// A schema document exercising every widget kind plus `$ref` indirection.
#[allow(dead_code)]
pub fn kitchen_sink_schema() -> Value {
    json!({
        "type": "object",
        "definitions": {
            "retry_count": { "type": "integer", "minimum": 0, "maximum": 10 },
        },
        "properties": {
            "name": { "type": "string", "pattern": "^[a-z_]+$", "title": "Name" },
            "start": { "type": "string", "format": "date" },
            "threshold": { "type": "number", "minimum": 0.5 },
            "retries": { "$ref": "#/definitions/retry_count" },
            "enabled": { "type": "boolean" },
            "tags": { "type": "array", "items": { "type": "string" } },
            "window": {
                "type": "object",
                "properties": {
                    "from": { "type": "string", "format": "date" },
                    "to": { "type": "string", "format": "date" },
                },
            },
        },
        "required": ["name", "start", "tags"],
    })
}

/// The end-to-end schema from the date round-trip property.
#[allow(dead_code)]
pub fn date_only_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "start": { "type": "string", "format": "date" },
        },
        "required": ["start"],
    })
}

#[allow(dead_code)]
pub fn text_option(name: &str) -> JobOption {
    JobOption {
        name: name.to_string(),
        display_name: None,
        description: None,
        option_type: OptionType::Text,
        required: false,
        multi_valued: false,
        default_value: None,
        credential_type: None,
        json_schema: None,
    }
}

#[allow(dead_code)]
pub fn typed_option(name: &str, option_type: OptionType) -> JobOption {
    JobOption {
        option_type,
        ..text_option(name)
    }
}

#[allow(dead_code)]
pub fn json_schema_option(schema_doc: Value) -> JobOption {
    JobOption {
        name: "json".to_string(),
        option_type: OptionType::JsonSchema,
        json_schema: Some(schema_doc),
        ..text_option("json")
    }
}

/// A workflow touching every boundary-serialized field: a mysql step, a
/// notification with extensions and a json_schema option.
#[allow(dead_code)]
pub fn sample_workflow() -> Workflow {
    let mysql_ext: StepExtension = serde_json::from_value(json!({
        "sql": "SELECT 1",
        "credential_id": 3,
        "row_limit": 100,
    }))
    .unwrap();
    let script_ext: StepExtension =
        serde_json::from_value(json!({ "script": "print(1)" })).unwrap();

    serde_json::from_value::<Workflow>(json!({
        "name": "nightly-report",
        "timeout": 600,
        "retry": 2,
        "schedule_enabled": true,
        "schedule_crontab": "0 3 * * *",
        "schedule_timezone": "UTC",
        "node_type": "local",
        "notifications": [{
            "trigger": "on_failure",
            "notification_type": "webhook",
            "extensions": { "url": "https://hooks.example/x" },
        }],
        "options": [],
        "steps": [],
    }))
    .map(|mut wf| {
        wf.options = vec![
            text_option("env"),
            json_schema_option(date_only_schema()),
        ];
        wf.steps = vec![
            WorkflowStep {
                order: 1,
                step_type: StepType::PythonScript,
                extension: script_ext,
            },
            WorkflowStep {
                order: 2,
                step_type: StepType::Mysql,
                extension: mysql_ext,
            },
        ];
        wf
    })
    .unwrap()
}
