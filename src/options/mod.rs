//! Job options: the named, typed run-time parameters a job declares.

mod args;

pub use args::build_args;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of option kinds a job can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Text,
    Date,
    Number,
    File,
    Credential,
    JsonSchema,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionType::Text => "text",
            OptionType::Date => "date",
            OptionType::Number => "number",
            OptionType::File => "file",
            OptionType::Credential => "credential",
            OptionType::JsonSchema => "json_schema",
        };
        f.write_str(name)
    }
}

/// One declared run-time parameter.
///
/// Invariants (enforced by the authoring form, carried here as documentation):
/// a `json_schema` option is canonically named `"json"` and must carry a
/// decodable schema document in `json_schema`; a `credential` option must carry
/// `credential_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub option_type: OptionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,
    /// Schema document for `json_schema`-typed options (wire form: the plain
    /// JSON document; the editing boundary carries it as a JSON string, see
    /// [`crate::workflow::codec`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<serde_json::Value>,
}

impl JobOption {
    /// Label shown next to the parameter control.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
