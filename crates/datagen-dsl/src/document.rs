use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::ast::{Kind, Node};
use crate::error::{DslError, Result};

/// Emit the JSON Schema for serialized syntax trees.
pub fn ast_json_schema() -> RootSchema {
    schema_for!(Node)
}

/// Validate a JSON document against the syntax tree schema.
///
/// Returns one `path: message` entry per violation; an empty list means the
/// document is structurally valid.
pub fn validate_document_json(document: &Value) -> Result<Vec<String>> {
    let schema = serde_json::to_value(ast_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| DslError::Schema(err.to_string()))?;

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            issues.push(format!("{path}: {error}"));
        }
    }
    Ok(issues)
}

/// Validate and deserialize a document whose top-level node is `root`.
pub fn load_document(document: &Value) -> Result<Node> {
    let issues = validate_document_json(document)?;
    if !issues.is_empty() {
        return Err(DslError::InvalidDocument(issues));
    }

    let node: Node = serde_json::from_value(document.clone())?;
    if node.kind() != Kind::Root {
        return Err(DslError::NotRoot(node.kind().to_string()));
    }
    Ok(node)
}
