#[macro_use]
extern crate criterion;

use criterion::Criterion;
use ordered_treap::{Config, Treap};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

const NUM_KEYS: u64 = 100_000;

fn get_rng_for_test() -> XorShiftRng { XorShiftRng::seed_from_u64(123) }

fn filled_treap(rng: &mut XorShiftRng) -> (Treap<u64, u64>, Vec<u64>) {
    let mut treap = Treap::with_config(Config::default().with_seed(123));
    let mut keys = Vec::with_capacity(NUM_KEYS as usize);
    for _ in 0..NUM_KEYS {
        let key = rng.gen::<u64>();
        treap.insert(key, key);
        keys.push(key);
    }
    (treap, keys)
}

fn treap_benchmark(c: &mut Criterion) {
    c.bench_function("Treap randomly insert", |b| {
        let mut treap = Treap::with_config(Config::default().with_seed(123));
        let mut operation_rng = get_rng_for_test();
        b.iter(|| {
            let key = operation_rng.gen::<u64>();
            treap.insert(key, key)
        });
    });

    c.bench_function("Treap randomly get", |b| {
        let mut operation_rng = get_rng_for_test();
        let (treap, keys) = filled_treap(&mut operation_rng);
        b.iter(|| {
            let key = &keys[operation_rng.gen_range(0, keys.len())];
            treap.get(key).is_ok()
        });
    });

    c.bench_function("Treap randomly remove and reinsert", |b| {
        let mut operation_rng = get_rng_for_test();
        let (mut treap, keys) = filled_treap(&mut operation_rng);
        b.iter(|| {
            let key = keys[operation_rng.gen_range(0, keys.len())];
            if let Ok(value) = treap.remove(&key) {
                treap.insert(key, value);
            }
        });
    });

    c.bench_function("Treap split and merge", |b| {
        let mut operation_rng = get_rng_for_test();
        let (treap, _) = filled_treap(&mut operation_rng);
        let mut treap = Some(treap);
        b.iter(|| {
            if let Some(whole) = treap.take() {
                let (left, right) = whole.split(&operation_rng.gen::<u64>());
                treap = Some(Treap::merge(left, right));
            }
        });
    });
}

criterion_group!(benches, treap_benchmark);
criterion_main!(benches);
