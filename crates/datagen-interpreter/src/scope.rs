use std::collections::HashMap;

use datagen_generate::Entity;

use crate::errors::{InterpreterError, Result};

/// Lexically nested table of entity symbols.
///
/// A child scope borrows its parent for lookups only; symbols defined in a
/// child are dropped with it and never become visible to ancestors.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    symbols: HashMap<String, Entity>,
    parent: Option<&'p Scope<'p>>,
}

impl<'p> Scope<'p> {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Scope<'_> {
        Scope {
            symbols: HashMap::new(),
            parent: Some(self),
        }
    }

    /// Register `entity` in this scope; a same-scope redefinition replaces it.
    pub fn define(&mut self, name: impl Into<String>, entity: Entity) {
        self.symbols.insert(name.into(), entity);
    }

    /// Look `name` up here, then in each ancestor.
    pub fn resolve(&self, name: &str) -> Result<&Entity> {
        let mut current = Some(self);
        while let Some(scope) = current {
            if let Some(entity) = scope.symbols.get(name) {
                return Ok(entity);
            }
            current = scope.parent;
        }
        Err(InterpreterError::UnresolvedSymbol(name.to_string()))
    }

    /// Symbol defined directly in this scope.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.symbols.values()
    }
}
