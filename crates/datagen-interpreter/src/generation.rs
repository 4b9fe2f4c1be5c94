use datagen_dsl::{Kind, Node, NodeKind};
use datagen_generate::seed::hash_seed;
use datagen_generate::{Entity, GenerationOutput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::arguments::{MAX_AMOUNT, check_limit, validate_field_amount};
use crate::errors::{InterpreterError, Result};
use crate::interpreter::Interpreter;
use crate::scope::Scope;

impl Interpreter {
    /// Run a generation directive and return its records.
    ///
    /// The target is an identifier, optionally with inline overrides, or a
    /// definition bound into `scope` first. Each directive draws from its
    /// own generator derived from the run seed, the entity name and the
    /// directive's position.
    pub fn generate_from_node(
        &mut self,
        node: &Node,
        scope: &mut Scope<'_>,
    ) -> Result<GenerationOutput> {
        let NodeKind::Generation {
            target,
            args,
            overrides,
        } = &node.kind
        else {
            return Err(InterpreterError::UnexpectedNode {
                expected: Kind::Generation,
                found: node.kind(),
            });
        };

        let base = match &target.kind {
            NodeKind::Identifier { value } => scope.resolve(value)?.clone(),
            NodeKind::Definition { .. } => self.entity_from_node(target, scope)?,
            _ => {
                return Err(InterpreterError::UnexpectedNode {
                    expected: Kind::Identifier,
                    found: target.kind(),
                });
            }
        };

        let amount = validate_field_amount(args)?;
        if amount.min < 1 {
            return Err(InterpreterError::GenerationCount(base.name().to_string()));
        }
        check_limit(format!("Count of '{}'", base.name()), amount.max, MAX_AMOUNT)?;

        let entity = if overrides.is_empty() {
            base
        } else {
            self.extend_inline(&base, overrides, scope)?
        };

        let directive = self.next_directive();
        let key = format!("{}#{directive}", entity.name());
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(self.seed(), &key));
        let count = amount.sample(&mut rng);
        info!(entity = entity.name(), amount = %amount, count, "generating entities");

        let records = (0..count).map(|_| entity.generate(&mut rng)).collect();
        Ok(GenerationOutput {
            entity: entity.name().to_string(),
            amount,
            records,
        })
    }

    /// Anonymous extension of `base` used only by one directive.
    fn extend_inline(&self, base: &Entity, overrides: &[Node], scope: &Scope<'_>) -> Result<Entity> {
        let mut extension = Entity::extend(base.name(), base);
        let mut body = scope.child();
        for statement in overrides {
            self.bind_statement(&mut extension, statement, &mut body)?;
        }
        Ok(extension)
    }
}
