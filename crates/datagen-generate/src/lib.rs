//! Value generation for datagen entities.
//!
//! This crate owns the builtin field types and their leaf generators, the
//! runtime entity model produced by the interpreter, and the JSON writer for
//! generated records.

pub mod entity;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod seed;

pub use entity::{Entity, Field, FieldValue};
pub use errors::GenerationError;
pub use generators::{BuiltinType, Dictionary, FieldGenerator, GeneratedValue};
pub use model::{Amount, GenerateOptions, GenerationOutput, Record};
pub use output::json::{outputs_to_json, write_json};
