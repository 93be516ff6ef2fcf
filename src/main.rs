use rand::Rng;
use rusty_chains::{improved_hash, simple_hash, HashTable, TableConfig};
use std::process;

const SAMPLE_SIZE: i32 = 10000;

fn report_lookup(table: &HashTable, key: i32) {
    match table.get(key) {
        Some(value) => println!("Found key {} with value {}", key, value),
        None => println!("Key {} not found", key),
    }
}

fn collisions_demo() -> rusty_chains::Result<()> {
    println!("=== Hash Table Implementation ===\n");

    let mut table: HashTable = HashTable::new(10, simple_hash)?;
    table.insert(5, 500)?;
    table.insert(15, 1500)?;
    table.insert(25, 2500)?;
    table.insert(6, 600)?;
    table.insert(16, 1600)?;

    println!("After insertions:");
    println!("{}", table);

    report_lookup(&table, 15);
    report_lookup(&table, 7);

    println!("\nRemoving key 15...");
    if table.remove(15)? {
        println!("Key 15 removed successfully");
    } else {
        println!("Key 15 not found");
    }

    println!("\nAfter removal:");
    println!("{}", table);
    Ok(())
}

fn resizing_demo() -> rusty_chains::Result<()> {
    println!("=== Dynamic Resizing Demonstration ===\n");

    let config: TableConfig = TableConfig::with_capacity(10).report_resizes(true);
    let mut table: HashTable = HashTable::with_config(config, improved_hash)?;

    println!("Inserting elements to trigger resizing...");
    for i in 0..100 {
        table.insert(i, i * 100)?;
    }
    println!("\nFinal hash table state:");
    println!("Size: {}, Capacity: {}", table.len(), table.capacity());

    println!("\nRemoving elements to trigger shrinking...");
    for i in 0..80 {
        table.remove(i)?;
    }
    println!("\nFinal hash table state after removals:");
    println!("Size: {}, Capacity: {}", table.len(), table.capacity());
    println!(
        "Grew {} times, shrank {} times",
        table.stats().grows,
        table.stats().shrinks
    );
    Ok(())
}

fn comparison_demo() -> rusty_chains::Result<()> {
    println!("\n=== Hash Function Comparison ===\n");

    let mut simple: HashTable = HashTable::new(10, simple_hash)?;
    let mut improved: HashTable = HashTable::new(10, improved_hash)?;

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let key: i32 = rng.gen_range(0..100);
        let value: i32 = rng.gen_range(0..1000);
        simple.insert(key, value)?;
        improved.insert(key, value)?;
    }

    println!("Simple hash function collisions: {}", simple.collisions());
    println!("Improved hash function collisions: {}", improved.collisions());
    Ok(())
}

fn timing_demo() {
    println!("\n=== Timing ===\n");

    benchmarking::warm_up();

    let insert = benchmarking::measure_function(|measurer| {
        let mut table: HashTable = match HashTable::new(10, improved_hash) {
            Ok(table) => table,
            Err(_) => return,
        };
        for i in 0..SAMPLE_SIZE {
            measurer.measure(|| table.insert(i, i).is_ok());
        }
    });

    let lookup = benchmarking::measure_function(|measurer| {
        let mut table: HashTable = match HashTable::new(10, improved_hash) {
            Ok(table) => table,
            Err(_) => return,
        };
        for i in 0..SAMPLE_SIZE {
            if table.insert(i, i).is_err() {
                return;
            }
        }
        for i in 0..SAMPLE_SIZE {
            measurer.measure(|| table.get(i));
        }
    });

    let remove = benchmarking::measure_function(|measurer| {
        let mut table: HashTable = match HashTable::new(10, improved_hash) {
            Ok(table) => table,
            Err(_) => return,
        };
        for i in 0..SAMPLE_SIZE {
            if table.insert(i, i).is_err() {
                return;
            }
        }
        for i in 0..SAMPLE_SIZE {
            measurer.measure(|| table.remove(i).is_ok());
        }
    });

    for (name, result) in [("insert", insert), ("lookup", lookup), ("remove", remove)] {
        match result {
            Ok(result) => println!("Avg time to {} {:?}", name, result.elapsed()),
            Err(err) => eprintln!("Failed to time {}: {:?}", name, err),
        }
    }
}

fn main() {
    let demos: [fn() -> rusty_chains::Result<()>; 3] =
        [collisions_demo, resizing_demo, comparison_demo];
    for demo in demos {
        if let Err(err) = demo() {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
    timing_demo();
}
