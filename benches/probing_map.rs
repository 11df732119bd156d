#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use probing_map::ProbingMap;
use proptest::{
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
// Keeps the map at a 0.5 load factor once every item is stored
const CAPACITY: usize = ITEMS_AMOUNT * 2;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = proptest::collection::vec(any::<(String, u32)>(), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut probe_map = ProbingMap::with_capacity(CAPACITY).unwrap();
    let mut rust_map = HashMap::new();
    group.bench_function("probing map set", |b| {
        b.iter(|| {
            for (key, value) in &items {
                probe_map.set(key, *value).unwrap();
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in &items {
                rust_map.insert(key.clone(), *value);
            }
        });
    });
    group.bench_function("probing map get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = probe_map.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.bench_function("probing map delete and restore", |b| {
        b.iter(|| {
            for (key, value) in &items {
                if probe_map.delete(key).is_some() {
                    probe_map.set(key, *value).unwrap();
                }
            }
        });
    });
    group.bench_function("rust std remove and restore", |b| {
        b.iter(|| {
            for (key, value) in &items {
                if rust_map.remove(key).is_some() {
                    rust_map.insert(key.clone(), *value);
                }
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
