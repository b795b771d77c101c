use super::node::{SchemaKind, SchemaNode};
use crate::error::SchemaError;
use serde_json::Value;

/// Resolves a `$ref` target of the form `#/a/b/c` against the schema root
/// document and decodes the node it points at.
///
/// A target must land on a non-ref node; a ref-to-ref chain is rejected rather
/// than followed, which also rules out cycles.
pub fn resolve_ref(root: &Value, target: &str) -> Result<SchemaNode, SchemaError> {
    let pointer = target.strip_prefix('#').ok_or_else(|| not_found(target))?;

    // serde_json pointers use the same /a/b segments as the fragment form.
    let doc = root.pointer(pointer).ok_or_else(|| not_found(target))?;

    let node = SchemaNode::from_value(doc).map_err(|_| not_found(target))?;
    if let SchemaKind::Ref { .. } = node.kind {
        return Err(SchemaError::RefToRef {
            target: target.to_string(),
        });
    }
    Ok(node)
}

fn not_found(target: &str) -> SchemaError {
    SchemaError::RefNotFound {
        target: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_target() {
        let root = json!({
            "definitions": { "age": { "type": "integer", "minimum": 0 } },
            "type": "object",
        });
        let node = resolve_ref(&root, "#/definitions/age").unwrap();
        assert!(matches!(node.kind, SchemaKind::Integer { .. }));
    }

    #[test]
    fn missing_target_is_an_error_not_a_panic() {
        let root = json!({ "type": "object" });
        let err = resolve_ref(&root, "#/definitions/missing").unwrap_err();
        assert_eq!(
            err,
            SchemaError::RefNotFound {
                target: "#/definitions/missing".to_string()
            }
        );
    }

    #[test]
    fn ref_to_ref_is_rejected() {
        let root = json!({
            "a": { "$ref": "#/b" },
            "b": { "type": "string" },
        });
        let err = resolve_ref(&root, "#/a").unwrap_err();
        assert!(matches!(err, SchemaError::RefToRef { .. }));
    }
}
