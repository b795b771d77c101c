//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kataform crate so call
//! sites can pull the whole working set in one line.
//!
//! # Example
//!
//! ```rust,no_run
//! use kataform::prelude::*;
//! use serde_json::json;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = FormEngine::new(&json!({ "type": "object", "properties": {} }))?;
//! engine.set_value(&json!({}));
//! let _wire = engine.validate().map_err(|e| e[0].to_string())?;
//! # Ok(())
//! # }
//! ```

// Form engine and field tree
pub use crate::form::{FieldNode, FieldWidget, FormEngine, SyncState};

// Schema and value types
pub use crate::schema::{SchemaKind, SchemaNode, StringFormat};
pub use crate::value::{FormValue, DATE_FORMAT};

// Steps and options
pub use crate::options::{build_args, JobOption, OptionType};
pub use crate::step::{normalize, StepExtension, StepType, WorkflowStep};

// Workflow wire/edit shapes
pub use crate::workflow::{JobDefinition, NodeType, Workflow, WorkflowEdit};

// Run-time assembly
pub use crate::run::{collect_args, validate_all, RunRequest};

// Error types
pub use crate::error::{
    CodecError, ExtensionError, ExtensionErrorKind, FieldError, FieldErrorKind, SchemaError,
};
