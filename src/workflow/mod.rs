//! The wire model of a job's workflow and the editing-boundary codec.
//!
//! A job definition travels as plain JSON (`extension`, `json_schema` and
//! notification `extensions` are structured sub-objects). While a job is open
//! in the editor those sub-objects are held as canonical JSON strings instead;
//! [`codec`] owns the single encode/decode pair per field and the lossless
//! round-trip between the two shapes.

pub mod codec;
mod model;

pub use codec::{NotificationEdit, OptionEdit, StepEdit, WorkflowEdit};
pub use model::{
    JobDefinition, NodeType, Notification, NotificationTrigger, NotificationType, Workflow,
};
