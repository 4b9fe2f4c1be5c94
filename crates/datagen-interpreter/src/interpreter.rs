use chrono::NaiveDate;
use datagen_dsl::{Kind, Node, NodeKind, NodeSet};
use datagen_generate::seed::resolve_seed;
use datagen_generate::{BuiltinType, GenerateOptions, GenerationOutput};
use tracing::{info, warn};

use crate::errors::{InterpreterError, Result};
use crate::scope::Scope;

/// Walks a syntax tree, binding entities and running generation directives.
#[derive(Debug)]
pub struct Interpreter {
    seed: u64,
    base_date: NaiveDate,
    directives: usize,
}

impl Interpreter {
    pub fn new(options: GenerateOptions) -> Self {
        let seed = resolve_seed(options.seed);
        let base_date = options.base_date();
        info!(seed, base_date = %base_date, "interpreter configured");
        Self {
            seed,
            base_date,
            directives: 0,
        }
    }

    /// Seed driving every random draw of this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    /// Interpret `root` against a fresh root scope.
    pub fn run(&mut self, root: &Node) -> Result<Vec<GenerationOutput>> {
        let mut scope = Scope::root();
        self.visit(root, &mut scope)
    }

    /// Interpret the statements of `root` in order against `scope`.
    ///
    /// Stops at the first failing statement; no outputs are returned then.
    pub fn visit(&mut self, root: &Node, scope: &mut Scope<'_>) -> Result<Vec<GenerationOutput>> {
        let NodeKind::Root { children } = &root.kind else {
            return Err(InterpreterError::UnexpectedNode {
                expected: Kind::Root,
                found: root.kind(),
            });
        };

        let mut outputs = Vec::new();
        for statement in children {
            let result = match statement.kind() {
                Kind::Definition => self.entity_from_node(statement, scope).map(|_| ()),
                Kind::Generation => self
                    .generate_from_node(statement, scope)
                    .map(|output| outputs.push(output)),
                found => Err(InterpreterError::UnexpectedNode {
                    expected: Kind::Definition,
                    found,
                }),
            };
            if let Err(err) = result {
                warn!(location = %statement.location, error = %err, "statement failed");
                return Err(err);
            }
        }
        Ok(outputs)
    }

    /// Arguments used when a builtin field is declared without any.
    pub fn default_argument_for(&self, type_name: &str) -> Result<NodeSet> {
        let builtin = BuiltinType::from_name(type_name)
            .ok_or_else(|| InterpreterError::UnknownFieldType(type_name.to_string()))?;
        let defaults = match builtin {
            BuiltinType::String => vec![Node::int(5)],
            BuiltinType::Integer => vec![Node::int(1), Node::int(10)],
            BuiltinType::Decimal => vec![Node::float(1.0), Node::float(10.0)],
            // NaiveDate::default() is the Unix epoch.
            BuiltinType::Date => vec![Node::date(NaiveDate::default()), Node::date(self.base_date)],
            BuiltinType::Dict => {
                return Err(InterpreterError::MissingArguments(type_name.to_string()));
            }
            BuiltinType::Bool | BuiltinType::Uuid | BuiltinType::Null => NodeSet::new(),
        };
        Ok(defaults)
    }

    pub(crate) fn next_directive(&mut self) -> usize {
        let index = self.directives;
        self.directives += 1;
        index
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(GenerateOptions::default())
    }
}
