use std::collections::HashSet;
use std::fmt;
use std::mem;

use crate::config::TableConfig;
use crate::error::{HashTableError, Result, Storage};
use crate::hash::HashFn;

/// Index of a node in the arena, or the end of a chain.
type Link = Option<usize>;

#[derive(Debug, Clone, Copy)]
struct Node {
    key: i32,
    value: i32,
    next: Link,
    prev: Link,
}

/// A completed resize, as observed after an `insert` or `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Grew { from: usize, to: usize },
    Shrank { from: usize, to: usize },
}

impl Resize {
    pub fn to(&self) -> usize {
        match *self {
            Resize::Grew { to, .. } | Resize::Shrank { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeStats {
    pub grows: usize,
    pub shrinks: usize,
}

/// A separately chained hash table from `i32` keys to `i32` values.
///
/// Nodes live in an arena and chains are doubly linked through arena
/// indices. Each bucket holds the index of its chain head. Freed slots are
/// recycled through a free list, so a node index stays valid for exactly as
/// long as its key is present.
///
/// The capacity doubles when the load factor exceeds the grow threshold and
/// halves (never below the configured floor) when it drops under the shrink
/// threshold. Every resize relinks the existing nodes into a new bucket
/// array; nothing is copied.
#[derive(Debug, Clone)]
pub struct HashTable {
    // Node storage is declared first so it is released before the buckets.
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    buckets: Vec<Link>,
    size: usize,
    hash: HashFn,
    config: TableConfig,
    stats: ResizeStats,
    last_resize: Option<Resize>,
}

impl HashTable {
    /// Creates a table with `capacity` buckets and the default thresholds.
    pub fn new(capacity: usize, hash: HashFn) -> Result<Self> {
        Self::with_config(TableConfig::with_capacity(capacity), hash)
    }

    pub fn with_config(config: TableConfig, hash: HashFn) -> Result<Self> {
        config.validate()?;
        let buckets: Vec<Link> = Self::allocate_buckets(config.initial_capacity)?;
        Ok(HashTable {
            nodes: Vec::new(),
            free: Vec::new(),
            buckets,
            size: 0,
            hash,
            config,
            stats: ResizeStats::default(),
            last_resize: None,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn stats(&self) -> ResizeStats {
        self.stats
    }

    pub fn last_resize(&self) -> Option<Resize> {
        self.last_resize
    }

    /// Returns a copy of the value stored for `key`.
    pub fn get(&self, key: i32) -> Option<i32> {
        let bucket: usize = self.index_for(key);
        self.find(bucket, key).map(|index| self.node(index).value)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key`, or overwrites its value if it is already present.
    ///
    /// - Returns `Ok(Some(old))` when an existing value was replaced. The
    ///   size is unchanged and no resize happens.
    /// - Returns `Ok(None)` when a new node was spliced in at the head of its
    ///   chain. The table may then grow or shrink.
    ///
    /// An allocation failure leaves the table exactly as it was.
    pub fn insert(&mut self, key: i32, value: i32) -> Result<Option<i32>> {
        let bucket: usize = self.index_for(key);
        if let Some(index) = self.find(bucket, key) {
            let old: i32 = mem::replace(&mut self.node_mut(index).value, value);
            return Ok(Some(old));
        }

        // Everything fallible happens before the chain is touched.
        let prepared: Option<(Resize, Vec<Link>)> =
            self.prepare_resize(self.size + 1, true)?;
        let index: usize = self.allocate_slot()?;

        let head: Link = self.buckets[bucket];
        self.nodes[index] = Some(Node {
            key,
            value,
            next: head,
            prev: None,
        });
        if let Some(head) = head {
            self.node_mut(head).prev = Some(index);
        }
        self.buckets[bucket] = Some(index);
        self.size += 1;
        self.debug_check_links(bucket, &[Some(index)]);

        if let Some((resize, buckets)) = prepared {
            self.apply_resize(resize, buckets);
        }
        Ok(None)
    }

    /// Removes `key`. Returns `Ok(true)` if it was present.
    ///
    /// Removal can only shrink the table. If the smaller bucket array cannot
    /// be allocated the key is left in place and the error is returned.
    pub fn remove(&mut self, key: i32) -> Result<bool> {
        let bucket: usize = self.index_for(key);
        let index: usize = match self.find(bucket, key) {
            Some(index) => index,
            None => return Ok(false),
        };

        let prepared: Option<(Resize, Vec<Link>)> =
            self.prepare_resize(self.size - 1, false)?;

        let (prev, next): (Link, Link) = self.unlink(bucket, index);
        self.nodes[index] = None;
        // Capacity for this push was reserved when the slot was created.
        self.free.push(index);
        self.size -= 1;
        self.debug_check_links(bucket, &[prev, next]);

        if let Some((resize, buckets)) = prepared {
            self.apply_resize(resize, buckets);
        }
        Ok(true)
    }

    /// Iterates over the chain stored in `bucket`, head first. An out of
    /// range bucket yields nothing.
    pub fn bucket(&self, bucket: usize) -> Chain<'_> {
        Chain {
            table: self,
            cursor: self.buckets.get(bucket).copied().flatten(),
        }
    }

    /// One chain iterator per bucket, in bucket order.
    pub fn buckets(&self) -> impl Iterator<Item = Chain<'_>> + '_ {
        (0..self.capacity()).map(move |bucket| self.bucket(bucket))
    }

    /// Every `(key, value)` pair, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.buckets().flatten()
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        self.bucket(bucket).count()
    }

    /// Number of nodes that share a bucket with an earlier node.
    pub fn collisions(&self) -> usize {
        self.buckets()
            .map(|chain| chain.count().saturating_sub(1))
            .sum()
    }

    /// Walks every chain and verifies the structural invariants: chain heads
    /// have no `prev`, `next` and `prev` agree, every node sits in the bucket
    /// its key hashes to, keys are unique, and the live node count equals
    /// the size.
    pub fn check_invariants(&self) -> Result<()> {
        let corrupt =
            |bucket: usize, reason: String| HashTableError::CorruptChain { bucket, reason };
        let mut seen: HashSet<i32> = HashSet::with_capacity(self.size);
        let mut reachable: usize = 0;

        for bucket in 0..self.capacity() {
            let mut prev: Link = None;
            let mut cursor: Link = self.buckets[bucket];
            while let Some(index) = cursor {
                let node: &Node = self.live_node(bucket, index)?;
                if node.prev != prev {
                    return Err(corrupt(
                        bucket,
                        format!(
                            "key {} has prev {:?}, expected {:?}",
                            node.key, node.prev, prev
                        ),
                    ));
                }
                if self.index_for(node.key) != bucket {
                    let reason: String = format!("key {} is in the wrong bucket", node.key);
                    return Err(corrupt(bucket, reason));
                }
                if !seen.insert(node.key) {
                    return Err(corrupt(bucket, format!("duplicate key {}", node.key)));
                }
                reachable += 1;
                if reachable > self.size {
                    let reason: String = "more nodes reachable than the size".to_string();
                    return Err(corrupt(bucket, reason));
                }
                prev = cursor;
                cursor = node.next;
            }
        }

        let live: usize = self.nodes.iter().filter(|slot| slot.is_some()).count();
        for counted in [reachable, live] {
            if counted != self.size {
                return Err(HashTableError::SizeMismatch {
                    size: self.size,
                    counted,
                });
            }
        }
        Ok(())
    }

    /// Checks only what a single splice or unsplice in `bucket` can break:
    /// the chain head has no `prev`, each node in `around` agrees with its
    /// neighbours, and the live slot count equals the size.
    fn check_links(&self, bucket: usize, around: &[Link]) -> Result<()> {
        let corrupt = |reason: String| HashTableError::CorruptChain { bucket, reason };
        let live = |index: usize| self.live_node(bucket, index);

        if let Some(head) = self.buckets[bucket] {
            let node: &Node = live(head)?;
            if node.prev.is_some() {
                return Err(corrupt(format!("head key {} has a prev link", node.key)));
            }
        }
        for index in around.iter().copied().flatten() {
            let node: &Node = live(index)?;
            if let Some(next) = node.next {
                if live(next)?.prev != Some(index) {
                    return Err(corrupt(format!("key {} is not its next's prev", node.key)));
                }
            }
            if let Some(prev) = node.prev {
                if live(prev)?.next != Some(index) {
                    return Err(corrupt(format!("key {} is not its prev's next", node.key)));
                }
            }
        }

        let counted: usize = self.nodes.len() - self.free.len();
        if counted != self.size {
            return Err(HashTableError::SizeMismatch {
                size: self.size,
                counted,
            });
        }
        Ok(())
    }

    fn live_node(&self, bucket: usize, index: usize) -> Result<&Node> {
        match self.nodes.get(index) {
            Some(Some(node)) => Ok(node),
            _ => Err(HashTableError::CorruptChain {
                bucket,
                reason: format!("link to vacant slot {}", index),
            }),
        }
    }

    #[inline]
    fn debug_check_links(&self, bucket: usize, around: &[Link]) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check_links(bucket, around) {
                panic!("hash table invariant violated: {}", err);
            }
        }
    }

    /// Only run after a resize, which already visits every node.
    #[inline]
    fn debug_check_all(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check_invariants() {
                panic!("hash table invariant violated: {}", err);
            }
        }
    }

    #[inline]
    fn index_for(&self, key: i32) -> usize {
        Self::bucket_index(self.hash, key, self.capacity())
    }

    /// The strategy is trusted to stay in range; the final fold only keeps a
    /// misbehaving one from indexing out of bounds.
    #[inline]
    fn bucket_index(hash: HashFn, key: i32, capacity: usize) -> usize {
        hash(key, capacity) % capacity
    }

    #[inline]
    fn node(&self, index: usize) -> &Node {
        match &self.nodes[index] {
            Some(node) => node,
            None => unreachable!("link {} points at a vacant slot", index),
        }
    }

    #[inline]
    fn node_mut(&mut self, index: usize) -> &mut Node {
        match &mut self.nodes[index] {
            Some(node) => node,
            None => unreachable!("link {} points at a vacant slot", index),
        }
    }

    fn find(&self, bucket: usize, key: i32) -> Option<usize> {
        let mut cursor: Link = self.buckets[bucket];
        while let Some(index) = cursor {
            let node: &Node = self.node(index);
            if node.key == key {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    /// Detaches `index` from the chain in `bucket` and returns its former
    /// neighbours.
    fn unlink(&mut self, bucket: usize, index: usize) -> (Link, Link) {
        let (prev, next): (Link, Link) = {
            let node: &Node = self.node(index);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.buckets[bucket] = next,
        }
        if let Some(next) = next {
            self.node_mut(next).prev = prev;
        }
        (prev, next)
    }

    /// Returns a vacant arena slot, reusing a freed one when possible.
    fn allocate_slot(&mut self) -> Result<usize> {
        if let Some(index) = self.free.pop() {
            return Ok(index);
        }
        let requested: usize = self.nodes.len() + 1;
        self.nodes
            .try_reserve(1)
            .map_err(|e| HashTableError::alloc(Storage::Node, requested, e))?;
        // The free list can hold every slot, so `remove` never allocates.
        self.free
            .try_reserve(requested - self.free.len())
            .map_err(|e| HashTableError::alloc(Storage::Node, requested, e))?;
        self.nodes.push(None);
        Ok(self.nodes.len() - 1)
    }

    fn allocate_buckets(capacity: usize) -> Result<Vec<Link>> {
        let mut buckets: Vec<Link> = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|e| HashTableError::alloc(Storage::Buckets, capacity, e))?;
        buckets.resize(capacity, None);
        Ok(buckets)
    }

    /// Decides whether a table holding `size` keys at the current capacity
    /// must be resized, and if so allocates the new bucket array up front.
    /// Growth is checked first; a grow and a shrink never both happen.
    fn prepare_resize(
        &self,
        size: usize,
        may_grow: bool,
    ) -> Result<Option<(Resize, Vec<Link>)>> {
        let capacity: usize = self.capacity();
        let load_factor: f64 = size as f64 / capacity as f64;

        let resize: Resize = if may_grow && load_factor > self.config.grow_load_factor {
            let to: usize = capacity
                .checked_mul(2)
                .ok_or_else(|| HashTableError::overflow(Storage::Buckets))?;
            Resize::Grew { from: capacity, to }
        } else if capacity > self.config.min_capacity
            && load_factor < self.config.shrink_load_factor
        {
            let to: usize = (capacity / 2).max(self.config.min_capacity);
            Resize::Shrank { from: capacity, to }
        } else {
            return Ok(None);
        };

        let buckets: Vec<Link> = Self::allocate_buckets(resize.to())?;
        Ok(Some((resize, buckets)))
    }

    fn apply_resize(&mut self, resize: Resize, buckets: Vec<Link>) {
        self.rehash(buckets);
        self.debug_check_all();
        match resize {
            Resize::Grew { to, .. } => {
                self.stats.grows += 1;
                if self.config.report_resizes {
                    println!("Hash table resized up to {}", to);
                }
            }
            Resize::Shrank { to, .. } => {
                self.stats.shrinks += 1;
                if self.config.report_resizes {
                    println!("Hash table resized down to {}", to);
                }
            }
        }
        self.last_resize = Some(resize);
    }

    /// Moves every node into `buckets`, which must be empty. Each node is
    /// detached from its old chain and spliced at the head of its new one,
    /// so relative order within a chain is not preserved.
    fn rehash(&mut self, mut buckets: Vec<Link>) {
        let capacity: usize = buckets.len();
        for bucket in 0..self.buckets.len() {
            let mut cursor: Link = self.buckets[bucket].take();
            while let Some(index) = cursor {
                let key: i32 = {
                    let node: &mut Node = self.node_mut(index);
                    cursor = node.next;
                    node.prev = None;
                    node.key
                };
                let target: usize = Self::bucket_index(self.hash, key, capacity);
                let head: Link = buckets[target];
                self.node_mut(index).next = head;
                if let Some(head) = head {
                    self.node_mut(head).prev = Some(index);
                }
                buckets[target] = Some(index);
            }
        }
        self.buckets = buckets;
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hash Table (size: {}, capacity: {}):",
            self.size,
            self.capacity()
        )?;
        for (bucket, chain) in self.buckets().enumerate() {
            write!(f, "[{}]: ", bucket)?;
            for (key, value) in chain {
                write!(f, "({}:{}) -> ", key, value)?;
            }
            writeln!(f, "NULL")?;
        }
        Ok(())
    }
}

/// Read-only walk along one bucket's chain.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    table: &'a HashTable,
    cursor: Link,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let index: usize = self.cursor?;
        let node: &Node = self.table.node(index);
        self.cursor = node.next;
        Some((node.key, node.value))
    }
}
