use std::{fs, path::PathBuf};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};

use nandkit::{
    components::{self, adder::adder_inputs},
    persist, Blueprint, CircuitSim, Error, Repository,
};

fn library() -> Repository {
    let repository = Repository::new();
    components::register_all(&repository).unwrap();
    repository
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nandkit-{}-{name}.json", std::process::id()))
}

fn input_vectors(blueprint: &Blueprint) -> Vec<Vec<bool>> {
    let width = blueprint.num_inputs();
    if width <= 10 {
        return (0..1usize << width)
            .map(|row| (0..width).map(|bit| row >> bit & 1 == 1).collect())
            .collect();
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(width as u64);
    (0..256)
        .map(|_| (0..width).map(|_| rng.gen()).collect())
        .collect()
}

#[test]
fn library_round_trips_through_json() {
    let repository = library();
    for id in repository.ids() {
        let original = repository.lookup(&id).unwrap();
        if original.is_primitive() {
            continue;
        }
        let json = persist::to_json(&original).unwrap();
        let decoded = persist::from_json(&repository, &json).unwrap();
        assert_eq!(decoded.id(), id);
        assert_eq!(decoded.to_def(), original.to_def());
        for inputs in input_vectors(&original) {
            assert_eq!(
                decoded.evaluate(&inputs).unwrap(),
                original.evaluate(&inputs).unwrap(),
                "{id} on {inputs:?}"
            );
        }
    }
}

#[test]
fn save_then_import_into_fresh_library() {
    let source = library();
    let path = scratch_file("xor");
    persist::save(&source.lookup("XOR").unwrap(), &path).unwrap();

    let target = Repository::new();
    components::gates::register_not(&target).unwrap();
    components::gates::register_and(&target).unwrap();
    components::gates::register_or(&target).unwrap();
    let xor = persist::import(&target, &path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(target.contains("XOR"));
    assert_eq!(xor.evaluate(&[true, false]).unwrap(), vec![true]);
    assert_eq!(xor.evaluate(&[true, true]).unwrap(), vec![false]);
}

#[test]
fn load_needs_node_types_registered() {
    let source = library();
    let path = scratch_file("half-adder");
    persist::save(&source.lookup("HALF_ADDER").unwrap(), &path).unwrap();

    let empty = Repository::new();
    let result = persist::load(&empty, &path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(
        result,
        Err(Error::UnknownNodeType { node_type, .. }) if node_type == "XOR"
    ));
    assert!(!empty.contains("HALF_ADDER"));
}

#[test]
fn missing_file_is_an_io_error() {
    let repository = Repository::new();
    assert!(matches!(
        persist::load(&repository, scratch_file("does-not-exist")),
        Err(Error::Io(_))
    ));
}

#[test]
fn malformed_json() {
    let repository = Repository::new();
    assert!(matches!(
        persist::from_json(&repository, "{\"node_list\": ["),
        Err(Error::Json(_))
    ));
}

#[test]
fn anonymous_file_gets_generated_id() {
    let repository = Repository::new();
    let json = r#"{
        "node_list": ["NAND"],
        "connections": [
            {"sink": {"node": null, "port": 0}, "source": {"node": 0, "port": 0}},
            {"sink": {"node": 0, "port": 0}, "source": {"node": null, "port": 0}},
            {"sink": {"node": 0, "port": 1}, "source": {"constant": true}}
        ],
        "num_inputs": 1,
        "num_outputs": 1
    }"#;
    let not = persist::from_json(&repository, json).unwrap();
    assert_eq!(not.id(), "0000");
    assert_eq!(not.evaluate(&[true]).unwrap(), vec![false]);
}

#[test]
fn cyclic_file_is_rejected() {
    let repository = Repository::new();
    let json = r#"{
        "node_list": ["NAND"],
        "connections": [
            {"sink": {"node": null, "port": 0}, "source": {"node": 0, "port": 0}},
            {"sink": {"node": 0, "port": 0}, "source": {"node": 0, "port": 0}},
            {"sink": {"node": 0, "port": 1}, "source": {"constant": true}}
        ],
        "num_inputs": 0,
        "num_outputs": 1,
        "id": "OSCILLATOR"
    }"#;
    assert!(matches!(
        persist::from_json(&repository, json),
        Err(Error::CycleDetected { .. })
    ));
}

proptest! {
    #[test]
    fn decoded_subtractor_agrees(a in any::<u8>(), b in any::<u8>(), subtract in any::<bool>()) {
        let repository = library();
        let original = repository.lookup("8BIT_FULL_ADDER-SUBTRACTOR").unwrap();
        let decoded = persist::from_json(&repository, &persist::to_json(&original).unwrap()).unwrap();
        let inputs = adder_inputs(a as u64, b as u64, 8, subtract);
        prop_assert_eq!(decoded.evaluate(&inputs).unwrap(), original.evaluate(&inputs).unwrap());
    }
}
