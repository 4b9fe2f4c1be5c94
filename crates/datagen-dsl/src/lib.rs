//! Abstract syntax tree contracts for datagen.
//!
//! This crate defines the node model produced by the grammar, the literal
//! constructors the grammar calls into, and the JSON document form of a tree
//! that the CLI consumes.

pub mod ast;
pub mod document;
pub mod error;
pub mod nodes;

pub use ast::{Kind, Location, Node, NodeKind, NodeSet};
pub use document::{ast_json_schema, load_document, validate_document_json};
pub use error::{DslError, Result};
pub use nodes::ParseContext;

/// Date format accepted by date literals and emitted in documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
