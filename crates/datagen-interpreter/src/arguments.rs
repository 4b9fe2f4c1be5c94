use chrono::NaiveDate;
use datagen_dsl::{Node, NodeKind};
use datagen_generate::Amount;

use crate::errors::{InterpreterError, Result};

/// Longest `string` field accepted.
pub const MAX_TEXT_LENGTH: i64 = 1 << 20;

/// Largest record count or field cardinality accepted.
pub const MAX_AMOUNT: i64 = 1_000_000;

pub fn check_limit(what: impl Into<String>, value: i64, limit: i64) -> Result<()> {
    if value > limit {
        return Err(InterpreterError::LimitExceeded {
            what: what.into(),
            value,
            limit,
        });
    }
    Ok(())
}

/// Payload of a named argument node, or the node itself.
pub fn argument_value(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::Argument {
            value: Some(value), ..
        } => value,
        _ => node,
    }
}

pub fn expect_int(node: &Node) -> Result<i64> {
    let node = argument_value(node);
    node.as_int().ok_or_else(|| mismatch(node, "an integer"))
}

/// Decimal argument; integer literals are accepted.
pub fn expect_float(node: &Node) -> Result<f64> {
    let node = argument_value(node);
    node.as_float().ok_or_else(|| mismatch(node, "a decimal"))
}

pub fn expect_date(node: &Node) -> Result<NaiveDate> {
    let node = argument_value(node);
    node.as_date().ok_or_else(|| mismatch(node, "a date"))
}

pub fn expect_str(node: &Node) -> Result<&str> {
    let node = argument_value(node);
    node.as_str().ok_or_else(|| mismatch(node, "a string"))
}

fn mismatch(node: &Node, expected: &'static str) -> InterpreterError {
    InterpreterError::TypeMismatch {
        value: node.value_text(),
        expected,
        found: node.type_name(),
    }
}

/// Count range from zero, one or two integer tokens.
///
/// No tokens means exactly one. Lower bounds are checked by the caller,
/// since generation and field cardinality disagree on them.
pub fn validate_field_amount(args: &[Node]) -> Result<Amount> {
    match args {
        [] => Ok(Amount::single()),
        [count] => Ok(Amount::exactly(expect_int(count)?)),
        [min, max] => {
            let min = expect_int(min)?;
            let max = expect_int(max)?;
            if max < min {
                return Err(InterpreterError::InvertedRange {
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
            Ok(Amount::new(min, max))
        }
        _ => Err(InterpreterError::AmountArity),
    }
}
