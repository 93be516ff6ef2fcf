use rusty_chains::error::Storage;
use rusty_chains::{improved_hash, simple_hash, HashTable, HashTableError, TableConfig};

#[test]
fn huge_capacity_is_an_allocation_failure() {
    let result = HashTable::new(usize::MAX, simple_hash);
    match result {
        Err(HashTableError::AllocationFailure {
            what: Storage::Buckets,
            requested,
            ..
        }) => assert_eq!(requested, usize::MAX),
        other => panic!("expected an allocation failure, got {:?}", other),
    }
}

#[test]
fn huge_configured_capacity_is_an_allocation_failure() {
    let config: TableConfig = TableConfig::with_capacity(isize::MAX as usize / 2);
    let err: HashTableError = HashTable::with_config(config, improved_hash).unwrap_err();
    assert!(err.is_allocation_failure());
    assert!(matches!(
        err,
        HashTableError::AllocationFailure {
            what: Storage::Buckets,
            ..
        }
    ));
    assert!(err.to_string().contains("bucket array"));
}

#[test]
fn many_operations_finish_in_a_debug_build() {
    let mut table: HashTable = HashTable::new(10, improved_hash).unwrap();
    for i in 0..50_000 {
        table.insert(i, i).unwrap();
    }
    for i in 0..50_000 {
        assert_eq!(table.get(i), Some(i));
    }
    for i in 0..50_000 {
        assert!(table.remove(i).unwrap());
    }
    assert!(table.is_empty());
    assert_eq!(table.capacity(), 10);
}
