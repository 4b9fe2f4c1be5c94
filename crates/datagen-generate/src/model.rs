use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use indexmap::IndexMap;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::generators::GeneratedValue;

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for every random draw; random (and logged) when absent.
    pub seed: Option<u64>,
    /// Date treated as "today" by date field defaults.
    pub base_date: Option<NaiveDate>,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            base_date: None,
            pretty: true,
        }
    }
}

impl GenerateOptions {
    pub fn base_date(&self) -> NaiveDate {
        self.base_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Validated `{min, max}` count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub min: i64,
    pub max: i64,
}

impl Amount {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn exactly(count: i64) -> Self {
        Self::new(count, count)
    }

    pub const fn single() -> Self {
        Self::exactly(1)
    }

    pub fn is_single(&self) -> bool {
        *self == Self::single()
    }

    /// Draw a count: the fixed value, or uniform within `[min, max]`.
    pub fn sample(&self, rng: &mut dyn RngCore) -> usize {
        let count = if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        };
        usize::try_from(count).unwrap_or(0)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::single()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

/// One generated entity instance with fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: String,
    fields: IndexMap<String, GeneratedValue>,
}

impl Record {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn insert(&mut self, name: impl Into<String>, value: GeneratedValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.get(name)
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

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        Value::Object(object)
    }
}

/// Records produced by one generation directive.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub entity: String,
    pub amount: Amount,
    pub records: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn fixed_amount_samples_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Amount::exactly(3).sample(&mut rng), 3);
        assert_eq!(Amount::exactly(0).sample(&mut rng), 0);
        assert!(Amount::default().is_single());
    }

    #[test]
    fn ranged_amount_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let amount = Amount::new(1, 3);
        for _ in 0..100 {
            let count = amount.sample(&mut rng);
            assert!((1..=3).contains(&count));
        }
    }

    #[test]
    fn amount_display() {
        assert_eq!(Amount::exactly(2).to_string(), "2");
        assert_eq!(Amount::new(1, 3).to_string(), "1..=3");
    }

    #[test]
    fn record_keeps_declaration_order() {
        let mut record = Record::new("person");
        record.insert("name", GeneratedValue::Text("Ana".to_string()));
        record.insert("age", GeneratedValue::Int(4));
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(
            record.to_json(),
            serde_json::json!({ "name": "Ana", "age": 4 })
        );
        assert_eq!(
            serde_json::to_string(&record.to_json()).expect("serialize"),
            r#"{"name":"Ana","age":4}"#
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: GenerateOptions =
            serde_json::from_str(r#"{ "seed": 42 }"#).expect("parse options");
        assert_eq!(options.seed, Some(42));
        assert!(options.pretty);
        assert_eq!(options.base_date, None);
    }
}
