use std::fmt::Display;

use datagen_dsl::{Kind, Node, NodeKind};
use datagen_generate::{
    Amount, BuiltinType, Dictionary, Entity, Field, FieldGenerator, GeneratedValue,
};
use tracing::debug;

use crate::arguments::{
    MAX_AMOUNT, MAX_TEXT_LENGTH, check_limit, expect_date, expect_float, expect_int, expect_str,
    validate_field_amount,
};
use crate::errors::{InterpreterError, Result};
use crate::interpreter::Interpreter;
use crate::scope::Scope;

impl Interpreter {
    /// Bind a definition node into an entity and register it in `scope`.
    ///
    /// The body is bound in a child scope, so nested definitions stay local
    /// to it. An extension starts from a copy of its parent's fields.
    pub fn entity_from_node(&self, node: &Node, scope: &mut Scope<'_>) -> Result<Entity> {
        let NodeKind::Definition {
            name,
            children,
            related,
        } = &node.kind
        else {
            return Err(InterpreterError::UnexpectedNode {
                expected: Kind::Definition,
                found: node.kind(),
            });
        };

        let mut entity = match related {
            Some(parent) => {
                let parent_name = parent.value_text();
                let base = scope
                    .resolve(&parent_name)
                    .map_err(|_| InterpreterError::UnresolvedParent {
                        parent: parent_name.clone(),
                        entity: name.clone(),
                    })?;
                Entity::extend(name.clone(), base)
            }
            None => Entity::new(name.clone()),
        };

        {
            let mut body = scope.child();
            for statement in children {
                self.bind_statement(&mut entity, statement, &mut body)?;
            }
        }

        debug!(
            entity = %name,
            fields = entity.len(),
            extends = entity.parent().unwrap_or_default(),
            "bound entity"
        );
        scope.define(name.clone(), entity.clone());
        Ok(entity)
    }

    /// Resolve an identifier node to the entity it names.
    pub fn resolve_entity<'s>(&self, node: &Node, scope: &'s Scope<'_>) -> Result<&'s Entity> {
        match &node.kind {
            NodeKind::Identifier { value } => scope.resolve(value),
            _ => Err(InterpreterError::UnexpectedNode {
                expected: Kind::Identifier,
                found: node.kind(),
            }),
        }
    }

    /// Bind one body statement: a field, or a nested definition.
    pub(crate) fn bind_statement(
        &self,
        entity: &mut Entity,
        statement: &Node,
        scope: &mut Scope<'_>,
    ) -> Result<()> {
        match statement.kind() {
            Kind::Field => self.with_field(entity, statement, scope),
            Kind::Definition => self.entity_from_node(statement, scope).map(|_| ()),
            found => Err(InterpreterError::UnexpectedNode {
                expected: Kind::Field,
                found,
            }),
        }
    }

    /// Bind a field node onto `entity`, replacing an inherited field of the
    /// same name.
    pub fn with_field(&self, entity: &mut Entity, field: &Node, scope: &mut Scope<'_>) -> Result<()> {
        let (name, value, args) = field_parts(field)?;
        match &value.kind {
            NodeKind::Builtin { .. } => self.with_dynamic_field(entity, field),
            NodeKind::Identifier { value: symbol } => {
                let target = scope.resolve(symbol)?.clone();
                let amount = field_amount(name, args)?;
                entity.with_field(name, Field::entity(target, amount));
                Ok(())
            }
            NodeKind::Definition { .. } => {
                let nested = self.entity_from_node(value, scope)?;
                let amount = field_amount(name, args)?;
                entity.with_field(name, Field::entity(nested, amount));
                Ok(())
            }
            _ => {
                let literal = literal_value(value).ok_or(InterpreterError::UnexpectedNode {
                    expected: Kind::Builtin,
                    found: value.kind(),
                })?;
                if !args.is_empty() {
                    return Err(InterpreterError::Arity {
                        field_type: value.type_name().to_string(),
                        expected: 0,
                        found: args.len(),
                    });
                }
                entity.with_field(name, Field::fixed(literal));
                Ok(())
            }
        }
    }

    /// Bind a builtin-typed field, substituting default arguments when none
    /// are given.
    pub fn with_dynamic_field(&self, entity: &mut Entity, field: &Node) -> Result<()> {
        let (name, value, args) = field_parts(field)?;
        let NodeKind::Builtin { value: type_name } = &value.kind else {
            return Err(InterpreterError::UnexpectedNode {
                expected: Kind::Builtin,
                found: value.kind(),
            });
        };
        let builtin = BuiltinType::from_name(type_name)
            .ok_or_else(|| InterpreterError::UnknownFieldType(type_name.clone()))?;

        let defaults;
        let args = if args.is_empty() {
            defaults = self.default_argument_for(type_name)?;
            defaults.as_slice()
        } else {
            args
        };

        let generator = configure(builtin, name, args)?;
        entity.with_field(name, Field::dynamic(generator));
        Ok(())
    }
}

fn field_parts(field: &Node) -> Result<(&str, &Node, &[Node])> {
    match &field.kind {
        NodeKind::Field { name, value, args } => Ok((name.as_str(), value.as_ref(), args)),
        _ => Err(InterpreterError::UnexpectedNode {
            expected: Kind::Field,
            found: field.kind(),
        }),
    }
}

fn field_amount(field: &str, args: &[Node]) -> Result<Amount> {
    let amount = validate_field_amount(args)?;
    if amount.min < 0 {
        return Err(InterpreterError::NegativeAmount(field.to_string()));
    }
    check_limit(format!("Amount of field '{field}'"), amount.max, MAX_AMOUNT)?;
    Ok(amount)
}

/// Builtin type plus arguments to a generator; a wrong argument count is an
/// arity error before any argument is inspected.
fn configure(builtin: BuiltinType, field: &str, args: &[Node]) -> Result<FieldGenerator> {
    let generator = match (builtin, args) {
        (BuiltinType::String, [length]) => {
            let length = expect_int(length)?;
            check_limit(format!("Length of field '{field}'"), length, MAX_TEXT_LENGTH)?;
            let length = usize::try_from(length)
                .map_err(|_| InterpreterError::NegativeLength(field.to_string()))?;
            FieldGenerator::Text { length }
        }
        (BuiltinType::Integer, [min, max]) => {
            let (min, max) = ordered(expect_int(min)?, expect_int(max)?)?;
            FieldGenerator::Integer { min, max }
        }
        (BuiltinType::Decimal, [min, max]) => {
            let (min, max) = ordered(expect_float(min)?, expect_float(max)?)?;
            if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
                return Err(InterpreterError::NonFiniteRange {
                    field: field.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
            FieldGenerator::Decimal { min, max }
        }
        (BuiltinType::Date, [min, max]) => {
            let (min, max) = ordered(expect_date(min)?, expect_date(max)?)?;
            FieldGenerator::Date { min, max }
        }
        (BuiltinType::Dict, [category]) => {
            let category = expect_str(category)?;
            let dictionary = Dictionary::from_name(category)
                .ok_or_else(|| InterpreterError::UnknownDictionary(category.to_string()))?;
            FieldGenerator::Dictionary(dictionary)
        }
        (BuiltinType::Bool, []) => FieldGenerator::Bool,
        (BuiltinType::Uuid, []) => FieldGenerator::Uuid,
        (BuiltinType::Null, []) => FieldGenerator::Null,
        (builtin, args) => {
            return Err(InterpreterError::Arity {
                field_type: builtin.name().to_string(),
                expected: builtin.arity(),
                found: args.len(),
            });
        }
    };
    Ok(generator)
}

fn ordered<T: PartialOrd + Display>(min: T, max: T) -> Result<(T, T)> {
    if max < min {
        return Err(InterpreterError::InvertedRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok((min, max))
}

fn literal_value(node: &Node) -> Option<GeneratedValue> {
    let value = match &node.kind {
        NodeKind::LiteralString { value } => GeneratedValue::Text(value.clone()),
        NodeKind::LiteralInt { value } => GeneratedValue::Int(*value),
        NodeKind::LiteralFloat { value } => GeneratedValue::Float(*value),
        NodeKind::LiteralDate { value } => GeneratedValue::Date(*value),
        NodeKind::LiteralBool { value } => GeneratedValue::Bool(*value),
        NodeKind::LiteralNull => GeneratedValue::Null,
        _ => return None,
    };
    Some(value)
}
