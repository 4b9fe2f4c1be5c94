use thiserror::Error;

use crate::ast::Location;

/// Errors raised while constructing or loading syntax trees.
#[derive(Debug, Error)]
pub enum DslError {
    /// Integer or float lexeme that does not parse.
    #[error("{location}: malformed numeric literal '{text}'")]
    MalformedNumber { text: String, location: Location },
    /// Date lexeme that is not a calendar date.
    #[error("{location}: invalid date literal '{text}'")]
    InvalidDate { text: String, location: Location },
    /// Date literals carry no time of day.
    #[error("{location}: date literal does not support time or offset suffix '{suffix}'")]
    DateSuffix { suffix: String, location: Location },
    #[error("{location}: invalid boolean literal '{text}', expected true or false")]
    InvalidBool { text: String, location: Location },
    #[error("{location}: string literal {text} must be wrapped in double quotes")]
    UnquotedString { text: String, location: Location },
    /// A name-bearing position held something other than an identifier.
    #[error("{location}: expected an identifier, but found '{found}'")]
    ExpectedIdentifier { found: String, location: Location },
    #[error("document must contain a root node, found '{0}'")]
    NotRoot(String),
    #[error("invalid document: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DslError {
    /// Source location of construction errors, when one is known.
    pub fn location(&self) -> Option<&Location> {
        match self {
            DslError::MalformedNumber { location, .. }
            | DslError::InvalidDate { location, .. }
            | DslError::DateSuffix { location, .. }
            | DslError::InvalidBool { location, .. }
            | DslError::UnquotedString { location, .. }
            | DslError::ExpectedIdentifier { location, .. } => Some(location),
            _ => None,
        }
    }
}

/// Convenience alias for results returned by the dsl crate.
pub type Result<T> = std::result::Result<T, DslError>;
