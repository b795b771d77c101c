use super::field::{index_path, is_primitive, join_path, FieldNode};
use crate::error::{FieldError, FieldErrorKind, SchemaError};
use crate::schema::{resolve_ref, SchemaKind, SchemaNode, StringFormat};
use crate::value::{canonical_string, wire_to_edit, FormValue, DATE_FORMAT};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// The two states of the echo-suppression machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No outbound notification is pending; any inbound value applies.
    Idle,
    /// The engine just notified outward and will swallow the matching echo.
    SuppressingEcho,
}

/// Per-form echo suppression.
///
/// After the engine pushes a value outward it remembers the canonical
/// serialization of what it sent. If the very next inbound update is
/// byte-for-byte that same value, it is the consumer echoing the notification
/// back and must not reinitialize the widgets (which would drop cursor state
/// and re-trigger change events).
#[derive(Debug, Clone)]
pub struct EchoGuard {
    state: SyncState,
    token: Option<String>,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            token: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Records that the engine notified outward with `canonical`.
    pub fn notified(&mut self, canonical: String) {
        self.token = Some(canonical);
        self.state = SyncState::SuppressingEcho;
    }

    /// Decides whether an inbound update should be applied. Either way the
    /// machine returns to `Idle`: one notification suppresses at most one echo.
    pub fn should_apply(&mut self, canonical: &str) -> bool {
        let suppress =
            self.state == SyncState::SuppressingEcho && self.token.as_deref() == Some(canonical);
        self.state = SyncState::Idle;
        !suppress
    }

    pub fn reset(&mut self) {
        self.state = SyncState::Idle;
        self.token = None;
    }
}

impl Default for EchoGuard {
    fn default() -> Self {
        Self::new()
    }
}

type ChangeListener = Box<dyn FnMut(&Value)>;

/// One editing session over a schema: field tree, current value, validation.
pub struct FormEngine {
    schema: SchemaNode,
    root: Value,
    fields: FieldNode,
    value: FormValue,
    guard: EchoGuard,
    on_change: Option<ChangeListener>,
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEngine").finish_non_exhaustive()
    }
}

impl FormEngine {
    /// Builds an engine from a raw schema document. The document is kept as the
    /// `$ref` resolution root.
    pub fn new(doc: &Value) -> Result<Self, SchemaError> {
        let schema = SchemaNode::from_value(doc)?;
        Ok(Self::from_parts(schema, doc.clone()))
    }

    /// Builds an engine from an already-decoded schema plus its root document.
    pub fn from_parts(schema: SchemaNode, root: Value) -> Self {
        let fields = FieldNode::build(&schema, &root, "", "value", false);
        Self {
            schema,
            root,
            fields,
            value: FormValue::Null,
            guard: EchoGuard::new(),
            on_change: None,
        }
    }

    /// The render tree. Stable for the lifetime of the engine.
    pub fn fields(&self) -> &FieldNode {
        &self.fields
    }

    /// The current edit-representation value.
    pub fn value(&self) -> &FormValue {
        &self.value
    }

    /// The current value in wire representation.
    pub fn wire_value(&self) -> Value {
        self.value.to_wire()
    }

    pub fn sync_state(&self) -> SyncState {
        self.guard.state()
    }

    /// Registers the `value-changed` listener. Called with the wire value on
    /// every leaf edit.
    pub fn on_change(&mut self, listener: impl FnMut(&Value) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Pushes an external wire value into the form, converting to the edit
    /// representation. A value identical (canonically serialized) to the last
    /// one this engine notified outward is treated as an echo and ignored.
    pub fn set_value(&mut self, wire: &Value) {
        let canonical = canonical_string(wire);
        if !self.guard.should_apply(&canonical) {
            debug!(target: "kataform::form", "suppressed echoed value update");
            return;
        }
        self.value = wire_to_edit(&self.schema, &self.root, wire);
    }

    /// Applies a single leaf edit at `path` (dotted/indexed, e.g. `a.b[0].c`)
    /// and notifies the `value-changed` listener with the resulting wire value.
    pub fn set_field(&mut self, path: &str, value: FormValue) {
        let segments = parse_path(path);
        write_at(&mut self.value, &segments, value);

        let wire = self.value.to_wire();
        self.guard.notified(canonical_string(&wire));
        if let Some(listener) = self.on_change.as_mut() {
            listener(&wire);
        }
    }

    /// Clears every field back to absent, independent of the schema.
    pub fn reset(&mut self) {
        self.value = FormValue::Null;
        self.guard.reset();
    }

    /// Recursively validates every rendered leaf. Returns the fully coerced
    /// wire value, or the aggregate list of field-path-scoped errors.
    pub fn validate(&self) -> Result<Value, Vec<FieldError>> {
        let mut errors = Vec::new();
        let value = if self.value.is_absent() {
            None
        } else {
            Some(&self.value)
        };
        let walker = Validator { root: &self.root };
        let coerced = walker.validate_node(&self.schema, value, false, "", &mut errors);
        if errors.is_empty() {
            Ok(coerced.unwrap_or(Value::Null))
        } else {
            debug!(target: "kataform::form", count = errors.len(), "validation failed");
            Err(errors)
        }
    }
}

/// Recursive validation walker, borrowing the resolution root.
struct Validator<'a> {
    root: &'a Value,
}

impl<'a> Validator<'a> {
    fn validate_node(
        &self,
        schema: &SchemaNode,
        value: Option<&FormValue>,
        required: bool,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        // Absent leaves normalize to None before dispatch.
        let value = value.filter(|v| !v.is_absent());

        match &schema.kind {
            SchemaKind::Ref { target } => match resolve_ref(self.root, target) {
                Ok(resolved) => self.validate_node(&resolved, value, required, path, errors),
                Err(error) => {
                    errors.push(FieldError::new(path, FieldErrorKind::Schema(error)));
                    None
                }
            },

            SchemaKind::String { format, pattern } => match value {
                None => {
                    if required {
                        errors.push(FieldError::new(path, FieldErrorKind::Required));
                    }
                    None
                }
                Some(v) => self.validate_string(v, *format, pattern.as_deref(), path, errors),
            },

            SchemaKind::Number { minimum, maximum } => {
                self.validate_numeric(value, required, false, *minimum, *maximum, path, errors)
            }
            SchemaKind::Integer { minimum, maximum } => {
                self.validate_numeric(value, required, true, *minimum, *maximum, path, errors)
            }

            SchemaKind::Boolean => match value {
                // Absent toggles read as false; "required" does not apply.
                None => Some(Value::Bool(false)),
                Some(FormValue::Bool(b)) => Some(Value::Bool(*b)),
                Some(other) => {
                    self.type_mismatch("boolean", other, path, errors);
                    None
                }
            },

            SchemaKind::Array { items } => {
                let Some(item_schema) = items else {
                    errors.push(FieldError::new(
                        path,
                        FieldErrorKind::Schema(SchemaError::MissingItems),
                    ));
                    return None;
                };
                match value {
                    // The rendered list is the "key"; an untouched required
                    // array is present-and-empty, never a required violation.
                    None => Some(Value::Array(Vec::new())),
                    Some(FormValue::Array(elems)) => {
                        let item_required = is_primitive(item_schema);
                        let mut out = Vec::with_capacity(elems.len());
                        for (i, elem) in elems.iter().enumerate() {
                            let elem_path = index_path(path, i);
                            if let Some(coerced) = self.validate_node(
                                item_schema,
                                Some(elem),
                                item_required,
                                &elem_path,
                                errors,
                            ) {
                                out.push(coerced);
                            }
                        }
                        Some(Value::Array(out))
                    }
                    Some(other) => {
                        self.type_mismatch("array", other, path, errors);
                        None
                    }
                }
            }

            SchemaKind::Object {
                properties,
                required: required_set,
            } => {
                let Some(props) = properties else {
                    errors.push(FieldError::new(
                        path,
                        FieldErrorKind::Schema(SchemaError::MissingProperties),
                    ));
                    return None;
                };
                let child_map = match value {
                    None => None,
                    Some(FormValue::Object(map)) => Some(map),
                    Some(other) => {
                        self.type_mismatch("object", other, path, errors);
                        return None;
                    }
                };

                let mut out = serde_json::Map::with_capacity(props.len());
                for (name, prop_schema) in props {
                    let child_path = join_path(path, name);
                    let child_value = child_map.and_then(|m| m.get(name));
                    if let Some(coerced) = self.validate_node(
                        prop_schema,
                        child_value,
                        required_set.contains(name),
                        &child_path,
                        errors,
                    ) {
                        out.insert(name.clone(), coerced);
                    }
                }

                // An entirely absent object stays absent instead of
                // materializing as a bag of coerced defaults. Required-child
                // errors pushed above are the signal either way.
                if child_map.is_none() {
                    return None;
                }
                Some(Value::Object(out))
            }
        }
    }

    fn validate_string(
        &self,
        value: &FormValue,
        format: StringFormat,
        pattern: Option<&str>,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        match format {
            StringFormat::Date => match value {
                FormValue::Date(d) => Some(Value::String(d.format(DATE_FORMAT).to_string())),
                FormValue::Text(s) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                    Ok(d) => Some(Value::String(d.format(DATE_FORMAT).to_string())),
                    Err(_) => {
                        errors.push(FieldError::new(
                            path,
                            FieldErrorKind::InvalidDate { value: s.clone() },
                        ));
                        None
                    }
                },
                other => {
                    self.type_mismatch("date", other, path, errors);
                    None
                }
            },
            StringFormat::Plain => match value {
                FormValue::Text(s) => {
                    if let Some(pattern) = pattern {
                        match Regex::new(pattern) {
                            Ok(re) => {
                                if !re.is_match(s) {
                                    errors.push(FieldError::new(
                                        path,
                                        FieldErrorKind::Pattern {
                                            pattern: pattern.to_string(),
                                        },
                                    ));
                                    return None;
                                }
                            }
                            Err(e) => {
                                errors.push(FieldError::new(
                                    path,
                                    FieldErrorKind::Schema(SchemaError::InvalidDocument(format!(
                                        "invalid pattern: {}",
                                        e
                                    ))),
                                ));
                                return None;
                            }
                        }
                    }
                    Some(Value::String(s.clone()))
                }
                other => {
                    self.type_mismatch("string", other, path, errors);
                    None
                }
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_numeric(
        &self,
        value: Option<&FormValue>,
        required: bool,
        integer: bool,
        minimum: Option<f64>,
        maximum: Option<f64>,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        let expected = if integer { "integer" } else { "number" };
        match value {
            None => {
                if required {
                    errors.push(FieldError::new(path, FieldErrorKind::Required));
                }
                None
            }
            Some(FormValue::Number(n)) => {
                if integer && n.fract() != 0.0 {
                    self.type_mismatch(expected, &FormValue::Number(*n), path, errors);
                    return None;
                }
                if let Some(min) = minimum {
                    if *n < min {
                        errors.push(FieldError::new(
                            path,
                            FieldErrorKind::BelowMinimum {
                                value: *n,
                                minimum: min,
                            },
                        ));
                        return None;
                    }
                }
                if let Some(max) = maximum {
                    if *n > max {
                        errors.push(FieldError::new(
                            path,
                            FieldErrorKind::AboveMaximum {
                                value: *n,
                                maximum: max,
                            },
                        ));
                        return None;
                    }
                }
                Some(crate::value::json_number(*n))
            }
            Some(other) => {
                self.type_mismatch(expected, other, path, errors);
                None
            }
        }
    }

    fn type_mismatch(
        &self,
        expected: &'static str,
        found: &FormValue,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) {
        errors.push(FieldError::new(
            path,
            FieldErrorKind::TypeMismatch {
                expected,
                found: found.kind_name().to_string(),
            },
        ));
    }
}

/// One segment of a dotted/indexed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSeg {
    Key(String),
    Index(usize),
}

fn parse_path(path: &str) -> Vec<PathSeg> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let mut rest = part;
        if let Some(bracket) = rest.find('[') {
            if bracket > 0 {
                segments.push(PathSeg::Key(rest[..bracket].to_string()));
            }
            rest = &rest[bracket..];
            while let Some(close) = rest.find(']') {
                if let Ok(index) = rest[1..close].parse::<usize>() {
                    segments.push(PathSeg::Index(index));
                }
                rest = &rest[close + 1..];
                if !rest.starts_with('[') {
                    break;
                }
            }
        } else if !part.is_empty() {
            segments.push(PathSeg::Key(part.to_string()));
        }
    }
    segments
}

/// Writes `value` into the edit tree at `segments`, growing intermediate
/// containers as needed.
fn write_at(tree: &mut FormValue, segments: &[PathSeg], value: FormValue) {
    let Some((head, tail)) = segments.split_first() else {
        *tree = value;
        return;
    };
    match head {
        PathSeg::Key(key) => {
            if !matches!(tree, FormValue::Object(_)) {
                *tree = FormValue::Object(indexmap::IndexMap::new());
            }
            if let FormValue::Object(map) = tree {
                let slot = map.entry(key.clone()).or_insert(FormValue::Null);
                write_at(slot, tail, value);
            }
        }
        PathSeg::Index(index) => {
            if !matches!(tree, FormValue::Array(_)) {
                *tree = FormValue::Array(Vec::new());
            }
            if let FormValue::Array(items) = tree {
                while items.len() <= *index {
                    items.push(FormValue::Null);
                }
                write_at(&mut items[*index], tail, value);
            }
        }
    }
}
