use crate::step::StepType;
use thiserror::Error;

/// Errors that can occur while decoding a schema document or resolving `$ref` targets.
///
/// These are always localized to the field whose schema is broken; a bad subtree
/// renders as an inline error node and never aborts its siblings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Schema node is not a JSON object")]
    NotAnObject,

    #[error("Unknown schema type '{type_name}'")]
    UnknownKind { type_name: String },

    #[error("Could not resolve $ref '{target}'")]
    RefNotFound { target: String },

    #[error("$ref '{target}' resolves to another $ref, which is not allowed")]
    RefToRef { target: String },

    #[error("Object schema has no 'properties'")]
    MissingProperties,

    #[error("Array schema has no 'items'")]
    MissingItems,

    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),
}

/// A single validation failure, scoped to the dotted/indexed path of the field
/// that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {kind}")]
pub struct FieldError {
    pub path: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// The reason a field failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    #[error("value is required")]
    Required,

    #[error("format does not match pattern '{pattern}'")]
    Pattern { pattern: String },

    #[error("{value} is below the minimum of {minimum}")]
    BelowMinimum { value: f64, minimum: f64 },

    #[error("{value} is above the maximum of {maximum}")]
    AboveMaximum { value: f64, maximum: f64 },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error(transparent)]
    Schema(SchemaError),
}

/// Errors produced while normalizing a step's `extension` payload.
///
/// These are fatal to the enclosing submit operation and always identify the
/// offending step by its 1-based `order`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Step {order}: {kind}")]
pub struct ExtensionError {
    pub order: u32,
    pub kind: ExtensionErrorKind,
}

impl ExtensionError {
    pub fn new(order: u32, kind: ExtensionErrorKind) -> Self {
        Self { order, kind }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtensionErrorKind {
    #[error("{step_type} extension cannot be empty")]
    Empty { step_type: StepType },

    #[error("{step_type} extension is not valid JSON: {detail}")]
    InvalidJson { step_type: StepType, detail: String },

    #[error("{step_type} extension must be a JSON object")]
    NotAnObject { step_type: StepType },

    #[error("{step_type} extension is missing required field '{field}'")]
    MissingField {
        step_type: StepType,
        field: &'static str,
    },
}

/// Errors converting a workflow between its editing shape (JSON-in-a-string
/// boundary fields) and its wire shape. Fail-fast: the first bad field aborts
/// the whole submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error(transparent)]
    Step(#[from] ExtensionError),

    #[error("Notification {index}: extensions must be a JSON object")]
    BadNotification { index: usize },

    #[error("Option '{name}': json_schema is not valid JSON: {detail}")]
    BadOptionSchema { name: String, detail: String },
}

/// An opaque failure reported by one of the external collaborators (run-job,
/// script-test, upload, persistence). The engine never inspects these beyond
/// surfacing the message.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct CollaboratorError(pub String);
