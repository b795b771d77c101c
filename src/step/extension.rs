use super::StepType;
use crate::error::{ExtensionError, ExtensionErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A step's validated, type-specific configuration payload.
///
/// Always a JSON object. Fields beyond the per-type contract are passed through
/// untouched so newer backends can read keys this version does not know about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepExtension(pub Map<String, Value>);

impl StepExtension {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for StepExtension {
    fn from(map: Map<String, Value>) -> Self {
        StepExtension(map)
    }
}

/// Validates and coerces a raw `extension` payload into its canonical form.
///
/// `raw` may be `null`, a string (JSON text, or bare code for the script-like
/// step types), or an already-structured object; normalizing an
/// already-normalized object is a no-op. `order` is only used for error
/// reporting.
pub fn normalize(
    step_type: StepType,
    raw: Option<&Value>,
    order: u32,
) -> Result<StepExtension, ExtensionError> {
    let err = |kind| Err(ExtensionError::new(order, kind));

    // Step 1: empty payloads. MySQL has mandatory fields, everything else
    // tolerates an absent extension.
    let raw = match raw {
        None | Some(Value::Null) => {
            return empty_extension(step_type, order);
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            return empty_extension(step_type, order);
        }
        Some(other) => other,
    };

    // Step 2: strings must parse as JSON, with a bare-code convenience wrap
    // for the script-like types.
    let parsed: Value = match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => parsed,
            Err(parse_err) => match step_type {
                StepType::PythonScript => {
                    debug!(target: "kataform::step", order, "wrapped bare script as extension");
                    return Ok(single_field("script", text));
                }
                StepType::Curl => {
                    debug!(target: "kataform::step", order, "wrapped bare command as extension");
                    return Ok(single_field("curl", text));
                }
                StepType::Mysql | StepType::Command | StepType::ShellScript => {
                    return err(ExtensionErrorKind::InvalidJson {
                        step_type,
                        detail: parse_err.to_string(),
                    });
                }
            },
        },
        Value::Object(map) => Value::Object(map.clone()),
        _ => {
            return err(ExtensionErrorKind::NotAnObject { step_type });
        }
    };

    let Value::Object(object) = parsed else {
        return err(ExtensionErrorKind::NotAnObject { step_type });
    };

    // Step 3: the per-type shape contract. Blank strings count as missing.
    match step_type {
        StepType::PythonScript => require_text(&object, "script", step_type, order)?,
        StepType::Curl => require_text(&object, "curl", step_type, order)?,
        StepType::Mysql => {
            require_text(&object, "sql", step_type, order)?;
            match object.get("credential_id") {
                Some(v) if !v.is_null() => {}
                _ => {
                    return err(ExtensionErrorKind::MissingField {
                        step_type,
                        field: "credential_id",
                    });
                }
            }
        }
        // Free-form: parsed JSON object, not further validated.
        StepType::Command | StepType::ShellScript => {}
    }

    // Step 4: return the object unchanged, unknown fields included.
    Ok(StepExtension(object))
}

fn empty_extension(step_type: StepType, order: u32) -> Result<StepExtension, ExtensionError> {
    match step_type {
        StepType::Mysql => Err(ExtensionError::new(
            order,
            ExtensionErrorKind::Empty { step_type },
        )),
        _ => Ok(StepExtension::default()),
    }
}

fn single_field(key: &str, text: &str) -> StepExtension {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), Value::String(text.to_string()));
    StepExtension(map)
}

fn require_text(
    object: &Map<String, Value>,
    field: &'static str,
    step_type: StepType,
    order: u32,
) -> Result<(), ExtensionError> {
    match object.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ExtensionError::new(
            order,
            ExtensionErrorKind::MissingField { step_type, field },
        )),
    }
}
