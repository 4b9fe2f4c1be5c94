use indexmap::IndexMap;
use rand::RngCore;

use crate::generators::{FieldGenerator, GeneratedValue};
use crate::model::{Amount, Record};

/// What a field produces each time its entity is generated.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Literal value repeated verbatim.
    Static(GeneratedValue),
    /// Builtin type with resolved arguments.
    Dynamic(FieldGenerator),
    /// Another entity, generated recursively.
    Entity(Box<Entity>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub value: FieldValue,
    pub amount: Amount,
}

impl Field {
    pub fn new(value: FieldValue) -> Self {
        Self {
            value,
            amount: Amount::single(),
        }
    }

    pub fn with_amount(value: FieldValue, amount: Amount) -> Self {
        Self { value, amount }
    }

    pub fn fixed(value: GeneratedValue) -> Self {
        Self::new(FieldValue::Static(value))
    }

    pub fn dynamic(generator: FieldGenerator) -> Self {
        Self::new(FieldValue::Dynamic(generator))
    }

    pub fn entity(entity: Entity, amount: Amount) -> Self {
        Self::with_amount(FieldValue::Entity(Box::new(entity)), amount)
    }

    /// Generate one value, or a list when the cardinality is not exactly one.
    pub fn generate_value(&self, rng: &mut dyn RngCore) -> GeneratedValue {
        if self.amount.is_single() {
            return self.generate_one(rng);
        }
        let count = self.amount.sample(rng);
        GeneratedValue::List((0..count).map(|_| self.generate_one(rng)).collect())
    }

    fn generate_one(&self, rng: &mut dyn RngCore) -> GeneratedValue {
        match &self.value {
            FieldValue::Static(value) => value.clone(),
            FieldValue::Dynamic(generator) => generator.generate(rng),
            FieldValue::Entity(entity) => GeneratedValue::Record(entity.generate(rng)),
        }
    }
}

/// Named collection of fields; the runtime form of a definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    parent: Option<String>,
    fields: IndexMap<String, Field>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: IndexMap::new(),
        }
    }

    /// New entity starting from an independent copy of `parent`'s fields.
    pub fn extend(name: impl Into<String>, parent: &Entity) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.name.clone()),
            fields: parent.fields.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Add a field, replacing any inherited one of the same name in place.
    pub fn with_field(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Record {
        let mut record = Record::new(self.name.clone());
        for (name, field) in &self.fields {
            record.insert(name.clone(), field.generate_value(rng));
        }
        record
    }
}
