use std::collections::TryReserveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HashTableError>;

/// Which piece of storage an allocation was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Node,
    Buckets,
}

impl std::fmt::Display for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Storage::Node => write!(f, "node"),
            Storage::Buckets => write!(f, "bucket array"),
        }
    }
}

#[derive(Error, Debug)]
pub enum HashTableError {
    #[error("Memory allocation failed for {what} ({requested} slots requested)")]
    AllocationFailure {
        what: Storage,
        requested: usize,
        #[source]
        source: Option<TryReserveError>,
    },
    #[error("Capacity must be at least 1, got: {0}")]
    InvalidCapacity(usize),
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Chain at bucket {bucket} is corrupt: {reason}")]
    CorruptChain { bucket: usize, reason: String },
    #[error("Size is {size} but {counted} nodes were counted")]
    SizeMismatch { size: usize, counted: usize },
}

impl HashTableError {
    pub(crate) fn alloc(what: Storage, requested: usize, source: TryReserveError) -> Self {
        HashTableError::AllocationFailure {
            what,
            requested,
            source: Some(source),
        }
    }

    /// A capacity computation overflowed before anything could be reserved.
    pub(crate) fn overflow(what: Storage) -> Self {
        HashTableError::AllocationFailure {
            what,
            requested: usize::MAX,
            source: None,
        }
    }

    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, HashTableError::AllocationFailure { .. })
    }
}
