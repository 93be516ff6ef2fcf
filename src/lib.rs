//! A resizable, separately chained hash table mapping `i32` keys to `i32`
//! values, with an injected hash function.
//!
//! ```
//! use rusty_chains::{hash::simple_hash, HashTable};
//!
//! let mut table = HashTable::new(10, simple_hash).unwrap();
//! table.insert(5, 500).unwrap();
//! table.insert(15, 1500).unwrap();
//! assert_eq!(table.get(15), Some(1500));
//! assert!(table.remove(15).unwrap());
//! assert_eq!(table.get(15), None);
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod hash_table;

pub use config::TableConfig;
pub use error::{HashTableError, Result};
pub use hash::{improved_hash, simple_hash, HashFn};
pub use hash_table::{Chain, HashTable, Resize, ResizeStats};
