use std::fs;
use std::path::PathBuf;

use datagen_generate::{
    Amount, Entity, Field, FieldGenerator, GeneratedValue, GenerationOutput, outputs_to_json,
    write_json,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn goat() -> Entity {
    let mut goat = Entity::new("Goat");
    goat.with_field("age", Field::dynamic(FieldGenerator::Integer { min: 1, max: 10 }));
    goat.with_field("species", Field::fixed(GeneratedValue::Text("capra".to_string())));
    goat
}

fn output_for(entity: &Entity, count: usize, seed: u64) -> GenerationOutput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    GenerationOutput {
        entity: entity.name().to_string(),
        amount: Amount::exactly(count as i64),
        records: (0..count).map(|_| entity.generate(&mut rng)).collect(),
    }
}

#[test]
fn repeated_entities_append_to_one_array() {
    let goat = goat();
    let outputs = vec![output_for(&goat, 2, 1), output_for(&goat, 3, 2)];

    let document = outputs_to_json(&outputs);
    let goats = document["Goat"].as_array().expect("goat array");
    assert_eq!(goats.len(), 5);
    for record in goats {
        assert_eq!(record["species"], "capra");
        let age = record["age"].as_i64().expect("age");
        assert!((1..=10).contains(&age));
    }
}

#[test]
fn same_seed_writes_same_file() {
    let goat = goat();
    let dir = temp_out_dir("determinism");
    let path_a = dir.join("a.json");
    let path_b = dir.join("b.json");

    let bytes = write_json(&path_a, &[output_for(&goat, 4, 42)], true).expect("write a");
    write_json(&path_b, &[output_for(&goat, 4, 42)], true).expect("write b");

    let a = fs::read_to_string(&path_a).expect("read a");
    let b = fs::read_to_string(&path_b).expect("read b");
    assert_eq!(a, b);
    assert_eq!(bytes, a.len() as u64);

    let parsed: serde_json::Value = serde_json::from_str(&a).expect("parse output");
    assert_eq!(parsed["Goat"].as_array().map(Vec::len), Some(4));
}

#[test]
fn compact_output_is_single_line() {
    let goat = goat();
    let dir = temp_out_dir("compact");
    let path = dir.join("entities.json");

    write_json(&path, &[output_for(&goat, 1, 3)], false).expect("write");
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents.trim_end().lines().count(), 1);
}

#[test]
fn output_keeps_declaration_order() {
    let mut zebra = Entity::new("Zebra");
    zebra.with_field("zeta", Field::fixed(GeneratedValue::Text("z".to_string())));
    zebra.with_field("alpha", Field::fixed(GeneratedValue::Int(1)));
    let aardvark = Entity::new("Aardvark");
    let dir = temp_out_dir("order");
    let path = dir.join("entities.json");

    let outputs = vec![output_for(&zebra, 1, 1), output_for(&aardvark, 1, 2)];
    write_json(&path, &outputs, false).expect("write");
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(
        contents.trim_end(),
        r#"{"Zebra":[{"zeta":"z","alpha":1}],"Aardvark":[{}]}"#
    );
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("datagen_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
