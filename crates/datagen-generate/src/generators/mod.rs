use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use rand::RngCore;
use serde_json::Value;

use crate::model::Record;

pub mod dictionary;
pub mod primitives;

pub use dictionary::Dictionary;

/// Generated value for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(String),
    Date(NaiveDate),
    /// Nested entity instance.
    Record(Record),
    /// Values of a field whose cardinality is not exactly one.
    List(Vec<GeneratedValue>),
}

impl GeneratedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GeneratedValue::Null)
    }

    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Null => Value::Null,
            GeneratedValue::Bool(value) => Value::Bool(*value),
            GeneratedValue::Int(value) => Value::from(*value),
            GeneratedValue::Float(value) => Value::from(*value),
            GeneratedValue::Text(value) | GeneratedValue::Uuid(value) => {
                Value::String(value.clone())
            }
            GeneratedValue::Date(value) => Value::String(value.format("%Y-%m-%d").to_string()),
            GeneratedValue::Record(record) => record.to_json(),
            GeneratedValue::List(values) => {
                Value::Array(values.iter().map(GeneratedValue::to_json).collect())
            }
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeneratedValue::Int(value) => Some(*value as f64),
            GeneratedValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) | GeneratedValue::Uuid(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            GeneratedValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            GeneratedValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GeneratedValue]> {
        match self {
            GeneratedValue::List(values) => Some(values),
            _ => None,
        }
    }
}

/// Builtin field types understood by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    String,
    Integer,
    Decimal,
    Date,
    Dict,
    Bool,
    Uuid,
    Null,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 8] = [
        BuiltinType::String,
        BuiltinType::Integer,
        BuiltinType::Decimal,
        BuiltinType::Date,
        BuiltinType::Dict,
        BuiltinType::Bool,
        BuiltinType::Uuid,
        BuiltinType::Null,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::String => "string",
            BuiltinType::Integer => "integer",
            BuiltinType::Decimal => "decimal",
            BuiltinType::Date => "date",
            BuiltinType::Dict => "dict",
            BuiltinType::Bool => "bool",
            BuiltinType::Uuid => "uuid",
            BuiltinType::Null => "null",
        }
    }

    /// Number of arguments the type takes when any are supplied.
    pub fn arity(&self) -> usize {
        match self {
            BuiltinType::String | BuiltinType::Dict => 1,
            BuiltinType::Integer | BuiltinType::Decimal | BuiltinType::Date => 2,
            BuiltinType::Bool | BuiltinType::Uuid | BuiltinType::Null => 0,
        }
    }
}

impl Display for BuiltinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builtin type with its resolved arguments.
///
/// Range variants expect `min <= max`; the binder enforces it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldGenerator {
    Text { length: usize },
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64 },
    Date { min: NaiveDate, max: NaiveDate },
    Dictionary(Dictionary),
    Bool,
    Uuid,
    Null,
}

impl FieldGenerator {
    pub fn generate(&self, rng: &mut dyn RngCore) -> GeneratedValue {
        match self {
            FieldGenerator::Text { length } => {
                GeneratedValue::Text(primitives::random_text(*length, rng))
            }
            FieldGenerator::Integer { min, max } => {
                GeneratedValue::Int(primitives::random_int(*min, *max, rng))
            }
            FieldGenerator::Decimal { min, max } => {
                GeneratedValue::Float(primitives::random_decimal(*min, *max, rng))
            }
            FieldGenerator::Date { min, max } => {
                GeneratedValue::Date(primitives::random_date(*min, *max, rng))
            }
            FieldGenerator::Dictionary(dictionary) => GeneratedValue::Text(dictionary.pick(rng)),
            FieldGenerator::Bool => GeneratedValue::Bool(primitives::random_bool(rng)),
            FieldGenerator::Uuid => GeneratedValue::Uuid(primitives::random_uuid(rng)),
            FieldGenerator::Null => GeneratedValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for builtin in BuiltinType::ALL {
            assert_eq!(BuiltinType::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(BuiltinType::from_name("grandson"), None);
    }

    #[test]
    fn arity_per_type() {
        assert_eq!(BuiltinType::String.arity(), 1);
        assert_eq!(BuiltinType::Dict.arity(), 1);
        assert_eq!(BuiltinType::Integer.arity(), 2);
        assert_eq!(BuiltinType::Date.arity(), 2);
        assert_eq!(BuiltinType::Uuid.arity(), 0);
    }

    #[test]
    fn generators_respect_their_arguments() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let min = NaiveDate::from_ymd_opt(2015, 1, 1).expect("date");
        let max = NaiveDate::from_ymd_opt(2017, 1, 1).expect("date");

        for _ in 0..50 {
            let text = FieldGenerator::Text { length: 10 }.generate(&mut rng);
            assert_eq!(text.as_str().map(|s| s.chars().count()), Some(10));

            let int = FieldGenerator::Integer { min: 1, max: 10 }.generate(&mut rng);
            assert!((1..=10).contains(&int.as_i64().expect("int")));

            let decimal = FieldGenerator::Decimal {
                min: 1.0,
                max: 200.0,
            }
            .generate(&mut rng);
            let decimal = decimal.as_f64().expect("float");
            assert!((1.0..=200.0).contains(&decimal));

            let date = FieldGenerator::Date { min, max }.generate(&mut rng);
            let date = date.as_date().expect("date");
            assert!(date >= min && date <= max);
        }
    }

    #[test]
    fn null_generator_and_json_shapes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(FieldGenerator::Null.generate(&mut rng).is_null());

        let date = NaiveDate::from_ymd_opt(2017, 7, 19).expect("date");
        assert_eq!(GeneratedValue::Date(date).to_json(), Value::from("2017-07-19"));
        assert_eq!(
            GeneratedValue::List(vec![GeneratedValue::Int(1), GeneratedValue::Null]).to_json(),
            serde_json::json!([1, null])
        );
    }
}
