//! The schema form engine.
//!
//! [`FormEngine`] interprets a schema node tree plus an externally pushed value
//! into a tree of typed field descriptors, and owns the session state of one
//! editing form: the current edit value, the change notification, the
//! echo-suppression machine, and the explicit `validate()`/`reset()` contract.

mod engine;
mod field;

pub use engine::{EchoGuard, FormEngine, SyncState};
pub use field::{FieldNode, FieldWidget};
