//! Semantic layer for datagen documents.
//!
//! Resolves entity symbols through nested scopes, binds definitions into
//! runtime entities with argument validation, and runs generation directives
//! against them.

pub mod arguments;
mod binder;
pub mod errors;
mod generation;
pub mod interpreter;
pub mod scope;

pub use arguments::validate_field_amount;
pub use errors::{ErrorKind, InterpreterError, Result};
pub use interpreter::Interpreter;
pub use scope::Scope;
