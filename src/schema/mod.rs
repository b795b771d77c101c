//! Recursive JSON-Schema-like type descriptors.
//!
//! A [`SchemaNode`] is the canonical in-memory form of the schema documents that
//! drive the form engine. Decoding from the raw JSON document happens in exactly
//! one place ([`SchemaNode::from_value`]); `$ref` indirection is resolved lazily
//! against the root document so that a broken reference only poisons the field
//! that uses it.

mod node;
mod resolve;

pub use node::{SchemaKind, SchemaNode, StringFormat};
pub use resolve::resolve_ref;
