use std::{sync::Arc, thread};

use nandkit::{
    components::{
        self,
        adder::{adder_inputs, adder_result},
    },
    BlueprintBuilder, CircuitSim, Repository, Source,
};

fn library() -> Arc<Repository> {
    let repository = Repository::new();
    components::register_all(&repository).unwrap();
    Arc::new(repository)
}

#[test]
fn shared_blueprint_across_threads() {
    let repository = library();
    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let repository = repository.clone();
            thread::spawn(move || {
                let adder = repository.lookup("8BIT_FULL_ADDER").unwrap();
                for a in (worker..256).step_by(8) {
                    for b in (0..256).step_by(17) {
                        let outputs = adder.evaluate(&adder_inputs(a, b, 8, false)).unwrap();
                        let (sum, carry) = adder_result(&outputs);
                        assert_eq!(sum, (a + b) % 256, "{a} + {b}");
                        assert_eq!(carry, a + b >= 256, "{a} + {b} carry");
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn registration_races_with_evaluation() {
    let repository = library();
    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let repository = repository.clone();
            thread::spawn(move || {
                for n in 0..25 {
                    let mut builder = BlueprintBuilder::new(2, 1).id(format!("W{worker}_{n}"));
                    let and = builder.gate("AND", [Source::input(0), Source::input(1)]);
                    builder.output(0, Source::node(and, 0));
                    builder.register(&repository).unwrap();
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let repository = repository.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let outputs = repository.evaluate("XOR", &[true, false]).unwrap();
                    assert_eq!(outputs, vec![true]);
                }
            })
        })
        .collect();
    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
    for worker in 0..4 {
        for n in 0..25 {
            let id = format!("W{worker}_{n}");
            assert_eq!(repository.evaluate(&id, &[true, true]).unwrap(), vec![true]);
        }
    }
}

#[test]
fn concurrent_auto_ids_are_unique() {
    let repository = Arc::new(Repository::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = repository.clone();
            thread::spawn(move || {
                (0..10)
                    .map(|_| {
                        let mut builder = BlueprintBuilder::new(1, 1);
                        builder.output(0, Source::input(0));
                        builder.register(&repository).unwrap().id().to_string()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    let mut ids: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 80);
    assert_eq!(repository.len(), 81);
}
