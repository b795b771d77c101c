use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the run-job collaborator receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub job_id: i64,
    pub args: IndexMap<String, Value>,
}

/// Structured result of an execution: free text, an optional tabular dataset
/// and optional captured logs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

/// What the run-job collaborator returns on success. `output` is a rendered
/// fragment the console displays as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub output: String,
    pub result: RunResult,
}

/// What the script-test collaborator receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTestRequest {
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<IndexMap<String, Value>>,
}

/// What the script-test collaborator returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptTestOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Server-assigned location of an uploaded file; passed through into the
/// argument map for `file`-typed options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
}
