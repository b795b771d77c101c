//! Workflow steps and their type-specific `extension` payloads.
//!
//! A step's `extension` arrives loosely typed at the editing boundary (a JSON
//! string, a bare script, or an already-structured object); [`normalize`] turns
//! it into a canonical [`StepExtension`] or fails with an [`crate::error::ExtensionError`]
//! that names the offending step's 1-based order.

mod extension;

pub use extension::{normalize, StepExtension};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of step kinds a workflow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Command,
    ShellScript,
    PythonScript,
    Curl,
    Mysql,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Command => "command",
            StepType::ShellScript => "shell_script",
            StepType::PythonScript => "python_script",
            StepType::Curl => "curl",
            StepType::Mysql => "mysql",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a workflow. `order` is the 1-based execution position; duplicate
/// or gapped orders are the caller's concern, not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub order: u32,
    pub step_type: StepType,
    pub extension: StepExtension,
}
