use crate::error::SchemaError;
use crate::schema::{resolve_ref, SchemaKind, SchemaNode, StringFormat};
use serde_json::Value;

/// The widget a field renders as. In this crate "rendering" produces data, not
/// markup: a consumer walks the tree and draws whatever its UI toolkit offers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Free text input, optionally constrained by a regex.
    Text { pattern: Option<String> },
    /// Date picker; edit value is a calendar date, wire value `"YYYY-MM-DD"`.
    Date,
    /// Numeric input. Integers step by 1, numbers by 0.01; bounds inclusive.
    Number {
        step: f64,
        minimum: Option<f64>,
        maximum: Option<f64>,
        integer: bool,
    },
    /// Boolean toggle. Absent reads as `false` and is never "required".
    Toggle,
    /// Ordered list of independently addable/removable items. `item` is the
    /// prototype field each row instantiates.
    List { item: Box<FieldNode> },
    /// Nested field group, one child per schema property.
    Group { children: Vec<FieldNode> },
    /// Terminal inline error for this subtree only; siblings render normally.
    Broken { error: SchemaError },
}

/// One renderable field, carrying its accumulated dotted/indexed path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub path: String,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub widget: FieldWidget,
}

impl FieldNode {
    /// Builds the field tree for `schema`. Malformed subtrees (missing
    /// `items`/`properties`, unresolvable refs) become [`FieldWidget::Broken`]
    /// nodes in place; construction itself never fails.
    pub fn build(schema: &SchemaNode, root: &Value, path: &str, name: &str, required: bool) -> FieldNode {
        let label = schema.label(name);
        let description = schema.description.clone();

        let widget = match &schema.kind {
            SchemaKind::Ref { target } => match resolve_ref(root, target) {
                Ok(resolved) => {
                    // The resolved node supplies the widget; title/description
                    // on the ref site win if present.
                    let inner = FieldNode::build(&resolved, root, path, name, required);
                    return FieldNode {
                        path: inner.path,
                        label: schema.title.clone().unwrap_or(inner.label),
                        description: description.or(inner.description),
                        required,
                        widget: inner.widget,
                    };
                }
                Err(error) => FieldWidget::Broken { error },
            },
            SchemaKind::String { format, pattern } => match format {
                StringFormat::Date => FieldWidget::Date,
                StringFormat::Plain => FieldWidget::Text {
                    pattern: pattern.clone(),
                },
            },
            SchemaKind::Number { minimum, maximum } => FieldWidget::Number {
                step: 0.01,
                minimum: *minimum,
                maximum: *maximum,
                integer: false,
            },
            SchemaKind::Integer { minimum, maximum } => FieldWidget::Number {
                step: 1.0,
                minimum: *minimum,
                maximum: *maximum,
                integer: true,
            },
            SchemaKind::Boolean => FieldWidget::Toggle,
            SchemaKind::Array { items } => match items {
                Some(item_schema) => {
                    let item_path = format!("{}[]", path);
                    // A row the user added must be filled in when the item is a
                    // primitive; object rows carry their own per-property rules.
                    // Neither inherits the array's own required flag.
                    let item_required = is_primitive(item_schema);
                    let item =
                        FieldNode::build(item_schema, root, &item_path, "item", item_required);
                    FieldWidget::List {
                        item: Box::new(item),
                    }
                }
                None => FieldWidget::Broken {
                    error: SchemaError::MissingItems,
                },
            },
            SchemaKind::Object {
                properties,
                required: required_set,
            } => match properties {
                Some(props) => {
                    let children = props
                        .iter()
                        .map(|(child_name, child_schema)| {
                            let child_path = join_path(path, child_name);
                            FieldNode::build(
                                child_schema,
                                root,
                                &child_path,
                                child_name,
                                required_set.contains(child_name),
                            )
                        })
                        .collect();
                    FieldWidget::Group { children }
                }
                None => FieldWidget::Broken {
                    error: SchemaError::MissingProperties,
                },
            },
        };

        FieldNode {
            path: path.to_string(),
            label,
            description,
            required,
            widget,
        }
    }
}

/// True for leaf kinds that render a single control.
pub(crate) fn is_primitive(schema: &SchemaNode) -> bool {
    matches!(
        schema.kind,
        SchemaKind::String { .. }
            | SchemaKind::Number { .. }
            | SchemaKind::Integer { .. }
            | SchemaKind::Boolean
    )
}

/// Joins a parent path and a child key into the dotted form used everywhere in
/// diagnostics (`a.b[0].c`).
pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Index form of [`join_path`] for array elements.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
