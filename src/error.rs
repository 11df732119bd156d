//! Error type shared by every fallible `ProbingMap` operation

use std::collections::TryReserveError;

use thiserror::Error;

/// Failures reported by `ProbingMap`.
///
/// A missing key is not an error: lookups and deletions report it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The map was asked for zero slots
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    /// The slot array could not be allocated
    #[error("failed to allocate {capacity} slots")]
    AllocationFailed {
        /// Number of slots requested
        capacity: usize,
        /// Allocator failure
        #[source]
        source: TryReserveError,
    },
    /// Every slot is taken by another key
    #[error("all {capacity} slots are occupied by other keys")]
    CapacityExhausted {
        /// Fixed capacity of the map that rejected the entry
        capacity: usize,
    },
}
