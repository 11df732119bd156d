//! # Probing Map
//!
//! A fixed-capacity hash map from byte-string keys to values, using open addressing with
//! linear probing.
//!
//! The slot array is allocated once, at construction, and never grows. Inserting a new key
//! into a full map fails instead of resizing. Deletion re-homes the run of entries that
//! follows the freed slot, so lookups never need tombstones and every stored key stays
//! reachable from its ideal slot.
//!
//! Keys are copied into the map; values are stored as given and handed back on deletion.
//! The map is meant for handle-like values (references, ids, indices) but accepts any type.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probing_map::{MapError, ProbingMap};
//!
//! let mut map = ProbingMap::with_capacity(2)?;
//!
//! // Insert values
//! map.set("Google", "Brin")?;
//! map.set("KPCB", "Kleiner")?;
//! assert_eq!(map.get("Google"), Some(&"Brin"));
//!
//! // Update values in place
//! assert_eq!(map.set("Google", "Page")?, Some("Brin"));
//! assert_eq!(map.len(), 2);
//!
//! // The capacity is fixed
//! assert_eq!(map.set("Snapchat", "Spiegel"), Err(MapError::CapacityExhausted { capacity: 2 }));
//! assert!((map.load() - 1.0).abs() < f64::EPSILON);
//!
//! // Remove values
//! assert_eq!(map.delete("KPCB"), Some("Kleiner"));
//! assert!(!map.contains("KPCB"));
//! # Ok::<(), MapError>(())
//! ```

/// Error type returned by fallible map operations
mod error;
/// Module implementing the fixed-capacity linear probing map
mod probing_map;
/// Probe-length statistics
mod stats;

pub use error::MapError;
pub use probing_map::{Iter, ProbingMap};
pub use stats::ProbeStats;
