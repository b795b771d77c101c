use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// One node of a form's value tree.
///
/// `Null` doubles as "absent": a field the user never touched and a field that
/// was reset both read as `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    Array(Vec<FormValue>),
    Object(IndexMap<String, FormValue>),
}

impl FormValue {
    /// True for the values the engine treats as "not provided": `Null` and the
    /// empty string. Empty arrays are deliberately NOT absent here; the form
    /// engine considers a present-but-empty list a real value (the run-time
    /// argument builder applies its own, stricter rule).
    pub fn is_absent(&self) -> bool {
        match self {
            FormValue::Null => true,
            FormValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Converts to the wire (plain JSON) representation. Dates become
    /// `"YYYY-MM-DD"` strings; everything else maps structurally.
    pub fn to_wire(&self) -> Value {
        match self {
            FormValue::Null => Value::Null,
            FormValue::Text(s) => Value::String(s.clone()),
            FormValue::Number(n) => json_number(*n),
            FormValue::Bool(b) => Value::Bool(*b),
            FormValue::Date(d) => Value::String(d.format(super::DATE_FORMAT).to_string()),
            FormValue::Array(items) => Value::Array(items.iter().map(Self::to_wire).collect()),
            FormValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_wire()))
                    .collect(),
            ),
        }
    }

    /// Structural conversion from plain JSON, with no date interpretation.
    /// Use [`crate::value::wire_to_edit`] when a schema is available to
    /// recover `Date` leaves.
    pub fn from_json(value: &Value) -> FormValue {
        match value {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(*b),
            Value::Number(n) => FormValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => FormValue::Text(s.clone()),
            Value::Array(items) => {
                FormValue::Array(items.iter().map(FormValue::from_json).collect())
            }
            Value::Object(map) => FormValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), FormValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, FormValue>> {
        match self {
            FormValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<FormValue>> {
        match self {
            FormValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, used in type-mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormValue::Null => "null",
            FormValue::Text(_) => "string",
            FormValue::Number(_) => "number",
            FormValue::Bool(_) => "boolean",
            FormValue::Date(_) => "date",
            FormValue::Array(_) => "array",
            FormValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Null => write!(f, "null"),
            FormValue::Text(s) => write!(f, "{}", s),
            FormValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FormValue::Bool(b) => write!(f, "{}", b),
            FormValue::Date(d) => write!(f, "{}", d.format(super::DATE_FORMAT)),
            FormValue::Array(_) | FormValue::Object(_) => write!(f, "{}", self.to_wire()),
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Null
    }
}

/// Renders an f64 back to JSON. Whole numbers re-emit as integers so that
/// `3` does not round-trip into `3.0` (serde_json treats those as unequal).
pub(crate) fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < (i64::MAX as f64) {
        Value::Number(serde_json::Number::from(n as i64))
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
