//! # Kataform - Schema-Driven Form/Value Engine for Workflow Jobs
//!
//! **Kataform** is the core of an administrative job console: it interprets
//! JSON-Schema-like type descriptions into typed, recursive field trees,
//! round-trips values between their wire form (plain JSON, `"YYYY-MM-DD"`
//! dates) and their edit form (calendar dates), normalizes the type-specific
//! `extension` payload of workflow steps, and shapes collected parameter
//! values into the argument map a run request carries.
//!
//! ## Core Workflow
//!
//! 1.  **Build a form**: decode a schema document into a [`form::FormEngine`];
//!     it exposes a render tree of typed field descriptors.
//! 2.  **Edit**: push external values with `set_value` (echoes of the engine's
//!     own notifications are suppressed), apply leaf edits with `set_field`.
//! 3.  **Validate**: `validate()` returns the fully coerced wire value or an
//!     aggregate of field-path-scoped errors.
//! 4.  **Normalize steps**: [`step::normalize`] turns loose `extension`
//!     payloads into canonical objects with per-type contracts.
//! 5.  **Build arguments**: [`options::build_args`] shapes option values (with
//!     `json_schema` sub-form output merged last) into the run request.
//!
//! ## Quick Start
//!
//! ```rust
//! use kataform::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = json!({
//!         "type": "object",
//!         "properties": {
//!             "start": { "type": "string", "format": "date" },
//!             "retries": { "type": "integer", "minimum": 0 },
//!         },
//!         "required": ["start"],
//!     });
//!
//!     let mut engine = FormEngine::new(&doc)?;
//!     engine.set_value(&json!({ "start": "2024-03-05", "retries": 2 }));
//!
//!     let wire = engine.validate().map_err(|errs| errs[0].to_string())?;
//!     assert_eq!(wire, json!({ "start": "2024-03-05", "retries": 2 }));
//!
//!     // Normalize a step extension: bare Python source is accepted as-is.
//!     let ext = normalize(StepType::PythonScript, Some(&json!("print(1)")), 1)?;
//!     assert_eq!(ext.get("script"), Some(&json!("print(1)")));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod form;
pub mod options;
pub mod prelude;
pub mod run;
pub mod schema;
pub mod step;
pub mod value;
pub mod workflow;
