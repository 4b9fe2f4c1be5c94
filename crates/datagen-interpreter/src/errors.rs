use datagen_dsl::{DslError, Kind};
use datagen_generate::GenerationError;
use thiserror::Error;

/// Category of an interpreter failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    SymbolResolution,
    Arity,
    TypeMismatch,
    Range,
    MissingArguments,
    Generation,
}

/// Terminal error for an interpretation run.
///
/// Display text is user-facing and stable.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Parse(#[from] DslError),
    #[error("Expected a {expected} node, but found {found}")]
    UnexpectedNode { expected: Kind, found: Kind },
    #[error("Cannot resolve symbol \"{0}\"")]
    UnresolvedSymbol(String),
    #[error("Cannot resolve parent entity \"{parent}\" for entity \"{entity}\"")]
    UnresolvedParent { parent: String, entity: String },
    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),
    #[error("Unknown dictionary '{0}'")]
    UnknownDictionary(String),
    #[error("Field of type '{0}' requires arguments")]
    MissingArguments(String),
    #[error("Field type '{field_type}' expected {expected} args, but {found} found.")]
    Arity {
        field_type: String,
        expected: usize,
        found: usize,
    },
    #[error("Field amount must be one or two values only")]
    AmountArity,
    #[error("Expected {value} to be {expected}, but was {found}.")]
    TypeMismatch {
        value: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Max '{max}' cannot be less than min '{min}'")]
    InvertedRange { min: String, max: String },
    #[error("Must generate at least 1 '{0}' entity")]
    GenerationCount(String),
    #[error("Field amount for '{0}' cannot be negative")]
    NegativeAmount(String),
    #[error("Length of field '{0}' cannot be negative")]
    NegativeLength(String),
    #[error("Decimal range '{min}'..'{max}' for field '{field}' must be finite")]
    NonFiniteRange {
        field: String,
        min: String,
        max: String,
    },
    #[error("{what} '{value}' exceeds the limit of {limit}")]
    LimitExceeded {
        what: String,
        value: i64,
        limit: i64,
    },
    #[error(transparent)]
    Output(#[from] GenerationError),
}

impl InterpreterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpreterError::Parse(_) | InterpreterError::UnexpectedNode { .. } => ErrorKind::Parse,
            InterpreterError::UnresolvedSymbol(_)
            | InterpreterError::UnresolvedParent { .. }
            | InterpreterError::UnknownFieldType(_)
            | InterpreterError::UnknownDictionary(_) => ErrorKind::SymbolResolution,
            InterpreterError::Arity { .. } | InterpreterError::AmountArity => ErrorKind::Arity,
            InterpreterError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            InterpreterError::InvertedRange { .. }
            | InterpreterError::GenerationCount(_)
            | InterpreterError::NegativeAmount(_)
            | InterpreterError::NegativeLength(_)
            | InterpreterError::NonFiniteRange { .. }
            | InterpreterError::LimitExceeded { .. } => ErrorKind::Range,
            InterpreterError::MissingArguments(_) => ErrorKind::MissingArguments,
            InterpreterError::Output(_) => ErrorKind::Generation,
        }
    }
}

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, InterpreterError>;
