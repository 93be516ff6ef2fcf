use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusty_chains::{improved_hash, simple_hash, HashFn, HashTable};
use std::collections::HashMap;

fn run_against_model(hash: HashFn, seed: u64, operations: usize, key_range: i32) {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    let mut table: HashTable = HashTable::new(10, hash).unwrap();
    let mut model: HashMap<i32, i32> = HashMap::new();

    for _ in 0..operations {
        let key: i32 = rng.gen_range(-key_range..key_range);
        match rng.gen_range(0..10) {
            0..=4 => {
                let value: i32 = rng.gen();
                let size: usize = table.len();
                let old: Option<i32> = table.insert(key, value).unwrap();
                assert_eq!(old, model.insert(key, value));
                assert_eq!(table.len(), if old.is_some() { size } else { size + 1 });
                assert_eq!(table.get(key), Some(value));
                assert!(table.load_factor() <= 0.75);
            }
            5..=7 => {
                let size: usize = table.len();
                let removed: bool = table.remove(key).unwrap();
                assert_eq!(removed, model.remove(&key).is_some());
                assert_eq!(table.len(), if removed { size - 1 } else { size });
                assert_eq!(table.get(key), None);
                assert!(table.capacity() == 10 || table.load_factor() >= 0.25);
            }
            _ => {
                assert_eq!(table.get(key), model.get(&key).copied());
            }
        }
        assert_eq!(table.len(), model.len());
    }

    table.check_invariants().unwrap();
    let mut pairs: Vec<(i32, i32)> = table.iter().collect();
    pairs.sort_unstable();
    let mut expected: Vec<(i32, i32)> = model.into_iter().collect();
    expected.sort_unstable();
    assert_eq!(pairs, expected);
}

#[test]
fn random_operations_with_simple_hash() {
    run_against_model(simple_hash, 1, 4000, 200);
}

#[test]
fn random_operations_with_improved_hash() {
    run_against_model(improved_hash, 2, 4000, 200);
}

#[test]
fn random_operations_over_a_wide_key_range() {
    run_against_model(improved_hash, 3, 3000, i32::MAX);
}

#[test]
fn custom_strategy_is_used() {
    fn everything_in_one_bucket(_key: i32, _capacity: usize) -> usize {
        0
    }
    let mut table: HashTable = HashTable::new(10, everything_in_one_bucket).unwrap();
    for i in 0..30 {
        table.insert(i, i).unwrap();
    }
    assert_eq!(table.chain_len(0), 30);
    assert_eq!(table.collisions(), 29);
    for i in 0..30 {
        assert_eq!(table.get(i), Some(i));
    }
    let occupied: usize = table
        .buckets()
        .filter(|chain| chain.clone().next().is_some())
        .count();
    assert_eq!(occupied, 1);
}

#[test]
fn out_of_range_strategy_still_lands_in_a_bucket() {
    fn too_large(key: i32, capacity: usize) -> usize {
        capacity + key.unsigned_abs() as usize
    }
    let mut table: HashTable = HashTable::new(10, too_large).unwrap();
    for i in -20..20 {
        table.insert(i, i).unwrap();
    }
    for i in -20..20 {
        assert_eq!(table.get(i), Some(i));
    }
}
