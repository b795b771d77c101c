use crate::error::SchemaError;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

/// Interpretation applied to a `string`-typed schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Plain,
    /// Renders as a date picker; wire form is `"YYYY-MM-DD"`.
    Date,
}

/// One node of a recursive schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: SchemaKind,
}

/// The closed set of node kinds the engine understands.
///
/// Every dispatch over a schema is an exhaustive match on this enum; adding a
/// kind forces every call site to be revisited.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String {
        format: StringFormat,
        pattern: Option<String>,
    },
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Integer {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Boolean,
    /// `items` stays optional so a malformed array schema can surface as an
    /// inline error node instead of failing the whole decode.
    Array { items: Option<Box<SchemaNode>> },
    /// Same for `properties` on objects.
    Object {
        properties: Option<IndexMap<String, SchemaNode>>,
        required: HashSet<String>,
    },
    Ref { target: String },
}

impl SchemaNode {
    /// Decodes a schema node from its raw JSON document form.
    ///
    /// This is the only place raw schema JSON is interpreted. Unknown `type`
    /// strings are a hard decode error; missing `items`/`properties` are not,
    /// because partial-schema resilience is part of the rendering contract.
    pub fn from_value(doc: &Value) -> Result<SchemaNode, SchemaError> {
        let obj = doc.as_object().ok_or(SchemaError::NotAnObject)?;

        let title = obj.get("title").and_then(Value::as_str).map(str::to_owned);
        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if let Some(target) = obj.get("$ref") {
            let target = target
                .as_str()
                .ok_or_else(|| {
                    SchemaError::InvalidDocument("$ref target must be a string".to_string())
                })?
                .to_owned();
            return Ok(SchemaNode {
                title,
                description,
                kind: SchemaKind::Ref { target },
            });
        }

        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::InvalidDocument("missing 'type'".to_string()))?;

        let kind = match type_name {
            "string" => {
                let format = match obj.get("format").and_then(Value::as_str) {
                    Some("date") => StringFormat::Date,
                    _ => StringFormat::Plain,
                };
                let pattern = obj
                    .get("pattern")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                SchemaKind::String { format, pattern }
            }
            "number" => SchemaKind::Number {
                minimum: obj.get("minimum").and_then(Value::as_f64),
                maximum: obj.get("maximum").and_then(Value::as_f64),
            },
            "integer" => SchemaKind::Integer {
                minimum: obj.get("minimum").and_then(Value::as_f64),
                maximum: obj.get("maximum").and_then(Value::as_f64),
            },
            "boolean" => SchemaKind::Boolean,
            "array" => {
                let items = match obj.get("items") {
                    Some(items_doc) => Some(Box::new(SchemaNode::from_value(items_doc)?)),
                    None => None,
                };
                SchemaKind::Array { items }
            }
            "object" => {
                let properties = match obj.get("properties").and_then(Value::as_object) {
                    Some(props) => {
                        let mut decoded = IndexMap::with_capacity(props.len());
                        for (name, prop_doc) in props {
                            decoded.insert(name.clone(), SchemaNode::from_value(prop_doc)?);
                        }
                        Some(decoded)
                    }
                    None => None,
                };
                let required = obj
                    .get("required")
                    .and_then(Value::as_array)
                    .map(|names| {
                        names
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default();
                SchemaKind::Object {
                    properties,
                    required,
                }
            }
            other => {
                return Err(SchemaError::UnknownKind {
                    type_name: other.to_string(),
                });
            }
        };

        Ok(SchemaNode {
            title,
            description,
            kind,
        })
    }

    /// The label a field derived from this node should display.
    pub fn label(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }
}
