use super::form_value::FormValue;
use crate::schema::{resolve_ref, SchemaKind, SchemaNode, StringFormat};
use chrono::NaiveDate;
use serde_json::Value;

/// Wire format for date-typed leaves.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The canonical serialization used for echo-suppression comparisons.
///
/// Two values are "the same update" exactly when their canonical strings are
/// byte-for-byte equal.
pub fn canonical_string(value: &Value) -> String {
    value.to_string()
}

/// Converts a wire value into the edit representation, guided by the schema.
///
/// Only leaves the schema marks as date-formatted strings are reinterpreted;
/// every other leaf maps structurally, so the conversion is lossless both ways
/// for non-date data. Conversion is total: values the schema does not describe
/// (extra object keys, wrong-typed leaves, unresolvable refs) are kept
/// structurally; validation, not conversion, is where mismatches are reported.
pub fn wire_to_edit(schema: &SchemaNode, root: &Value, wire: &Value) -> FormValue {
    match &schema.kind {
        SchemaKind::Ref { target } => match resolve_ref(root, target) {
            Ok(resolved) => wire_to_edit(&resolved, root, wire),
            Err(_) => FormValue::from_json(wire),
        },
        SchemaKind::String {
            format: StringFormat::Date,
            ..
        } => match wire {
            Value::String(s) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(date) => FormValue::Date(date),
                // Not a parseable date: keep the raw text so validation can
                // point at it instead of silently dropping the value.
                Err(_) => FormValue::Text(s.clone()),
            },
            other => FormValue::from_json(other),
        },
        SchemaKind::Array { items } => match (wire, items) {
            (Value::Array(elems), Some(item_schema)) => FormValue::Array(
                elems
                    .iter()
                    .map(|elem| wire_to_edit(item_schema, root, elem))
                    .collect(),
            ),
            _ => FormValue::from_json(wire),
        },
        SchemaKind::Object { properties, .. } => match (wire, properties) {
            (Value::Object(map), Some(props)) => {
                let mut converted = indexmap::IndexMap::with_capacity(map.len());
                for (key, raw) in map {
                    let value = match props.get(key) {
                        Some(prop_schema) => wire_to_edit(prop_schema, root, raw),
                        None => FormValue::from_json(raw),
                    };
                    converted.insert(key.clone(), value);
                }
                FormValue::Object(converted)
            }
            _ => FormValue::from_json(wire),
        },
        SchemaKind::String { .. }
        | SchemaKind::Number { .. }
        | SchemaKind::Integer { .. }
        | SchemaKind::Boolean => FormValue::from_json(wire),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date_schema() -> SchemaNode {
        SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "start": { "type": "string", "format": "date" },
                "note": { "type": "string" },
            },
        }))
        .unwrap()
    }

    #[test]
    fn date_strings_become_dates_and_back() {
        let schema = date_schema();
        let root = json!({});
        let wire = json!({ "start": "2024-03-05", "note": "hello" });

        let edit = wire_to_edit(&schema, &root, &wire);
        let obj = edit.as_object().unwrap();
        assert!(matches!(obj.get("start"), Some(FormValue::Date(_))));
        assert_eq!(obj.get("note"), Some(&FormValue::Text("hello".into())));

        assert_eq!(edit.to_wire(), wire);
    }

    #[test]
    fn unparseable_date_is_kept_as_text() {
        let schema = date_schema();
        let edit = wire_to_edit(&schema, &json!({}), &json!({ "start": "not-a-date" }));
        let obj = edit.as_object().unwrap();
        assert_eq!(obj.get("start"), Some(&FormValue::Text("not-a-date".into())));
    }

    #[test]
    fn non_date_round_trip_is_lossless() {
        let schema = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "n": { "type": "number" },
                "flag": { "type": "boolean" },
                "tags": { "type": "array", "items": { "type": "string" } },
            },
        }))
        .unwrap();
        let wire = json!({ "n": 1.5, "flag": true, "tags": ["a", "b"], "extra": null });
        let edit = wire_to_edit(&schema, &json!({}), &wire);
        assert_eq!(edit.to_wire(), wire);
    }

    #[test]
    fn unresolvable_ref_falls_back_to_structural() {
        let schema = SchemaNode::from_value(&json!({ "$ref": "#/nope" })).unwrap();
        let edit = wire_to_edit(&schema, &json!({}), &json!("kept"));
        assert_eq!(edit, FormValue::Text("kept".into()));
    }
}
