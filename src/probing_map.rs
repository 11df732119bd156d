use std::{mem, num::NonZeroUsize};

use log::{debug, trace, warn};

use crate::{error::MapError, stats::ProbeStats};

/// Odd multiplier of the polynomial rolling hash
const HASH_MULTIPLIER: u32 = 73_113;

/// Polynomial rolling hash of `key` reduced to a slot index.
///
/// The accumulator starts at zero and wraps on overflow, so the empty key lands in slot 0.
#[allow(clippy::arithmetic_side_effects)]
fn hash(key: &[u8], capacity: NonZeroUsize) -> usize {
    let accumulator = key
        .iter()
        .fold(0_u32, |acc, &byte| acc.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(byte)));
    // u32 always fits in usize on the targets this crate builds for
    let widened = usize::try_from(accumulator).unwrap_or(usize::MAX);
    widened % capacity
}

/// Slot indices visited by a linear probe starting at `start`, wrapping once around the table.
fn probe_sequence(start: usize, capacity: usize) -> impl Iterator<Item = usize> {
    (start..capacity).chain(0..start)
}

/// Number of slots a linear probe inspects going from `ideal` to `index`, inclusive.
fn probe_distance(ideal: usize, index: usize, capacity: usize) -> usize {
    let offset = index
        .checked_sub(ideal)
        .unwrap_or_else(|| capacity.saturating_sub(ideal).saturating_add(index));
    offset.saturating_add(1)
}

/// A single table position
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    /// Nothing stored here
    Empty,
    /// An owned key copy together with its value
    Occupied {
        /// Owned copy of the caller's key bytes
        key: Box<[u8]>,
        /// Value stored under the key
        value: V,
    },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Outcome of probing the table for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key sits at `index`, reached after inspecting `probes` slots
    Found {
        /// Slot holding the key
        index: usize,
        /// Slots inspected, counting the matching one
        probes: usize,
    },
    /// The key is absent and `index` is the first empty slot on its probe path
    Vacant {
        /// Slot where the key would be stored
        index: usize,
    },
    /// Every slot holds some other key
    Exhausted,
}

/// A fixed-capacity hash map with byte-string keys and linear probing.
///
/// The number of slots is chosen at construction and never changes: once every slot is
/// occupied, inserting a new key fails with [`MapError::CapacityExhausted`]. Deleting an
/// entry re-homes the occupied run that follows it, so every stored key stays reachable
/// from its ideal slot without tombstones.
///
/// Note: This implementation is not thread-safe. Callers sharing a map across threads must
/// serialise every operation themselves, e.g. with a single `Mutex` around the map.
#[derive(Debug, Clone)]
pub struct ProbingMap<V> {
    /// The slots storing the key-value pairs
    slots: Box<[Slot<V>]>,
    /// Fixed number of slots
    capacity: NonZeroUsize,
    /// Current number of occupied slots
    count: usize,
}

impl<V> ProbingMap<V> {
    /// Creates a map with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is zero and
    /// [`MapError::AllocationFailed`] if the slot array cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(MapError::ZeroCapacity)?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity.get())
            .map_err(|source| MapError::AllocationFailed { capacity: capacity.get(), source })?;
        slots.resize_with(capacity.get(), Slot::default);

        debug!("allocated probing map with {capacity} slots");
        Ok(Self { slots: slots.into_boxed_slice(), capacity, count: 0 })
    }

    /// Slot where a probe for `key` starts
    #[must_use]
    pub fn ideal_slot<K: AsRef<[u8]>>(&self, key: K) -> usize {
        hash(key.as_ref(), self.capacity)
    }

    /// Walks the probe path of `key` until it finds the key, an empty slot, or runs out of slots
    fn probe(&self, key: &[u8]) -> Probe {
        let start = hash(key, self.capacity);
        for (step, index) in probe_sequence(start, self.capacity.get()).enumerate() {
            match self.slots.get(index) {
                None => break,
                Some(Slot::Empty) => return Probe::Vacant { index },
                Some(Slot::Occupied { key: stored, .. }) if &**stored == key => {
                    return Probe::Found { index, probes: step.saturating_add(1) };
                }
                Some(Slot::Occupied { .. }) => {}
            }
        }
        Probe::Exhausted
    }

    /// Stores `value` under `key`.
    ///
    /// Returns `Ok(None)` when the key was new and `Ok(Some(previous))` when an existing
    /// entry was updated in place; updating never changes [`len`](Self::len).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityExhausted`] if the key is absent and no slot is free. The
    /// map is left untouched and `value` is dropped.
    pub fn set<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        let key = key.as_ref();
        match self.probe(key) {
            Probe::Vacant { index } => {
                self.put(index, Box::from(key), value);
                self.count = self.count.saturating_add(1);
                Ok(None)
            }
            Probe::Found { index, .. } => {
                Ok(self.value_mut_at(index).map(|current| mem::replace(current, value)))
            }
            Probe::Exhausted => {
                warn!("rejected key of {} bytes: all {} slots occupied", key.len(), self.capacity);
                Err(MapError::CapacityExhausted { capacity: self.capacity.get() })
            }
        }
    }

    /// Returns a reference to the value stored under `key`
    #[must_use]
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        match self.probe(key.as_ref()) {
            Probe::Found { index, .. } => self.value_at(index),
            Probe::Vacant { .. } | Probe::Exhausted => None,
        }
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        match self.probe(key.as_ref()) {
            Probe::Found { index, .. } => self.value_mut_at(index),
            Probe::Vacant { .. } | Probe::Exhausted => None,
        }
    }

    /// Returns true if an entry is stored under `key`
    #[must_use]
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.count > 0 && matches!(self.probe(key.as_ref()), Probe::Found { .. })
    }

    /// Removes the entry stored under `key` and returns its value.
    ///
    /// The occupied run following the freed slot is re-inserted entry by entry so that no
    /// key is cut off from its ideal slot by the new gap.
    pub fn delete<K: AsRef<[u8]>>(&mut self, key: K) -> Option<V> {
        if self.count == 0 {
            return None;
        }
        let Probe::Found { index, .. } = self.probe(key.as_ref()) else {
            return None;
        };
        let Slot::Occupied { value, .. } = self.take(index) else {
            return None;
        };
        self.count = self.count.saturating_sub(1);

        let rehomed = self.rehome_after(index);
        debug!("deleted entry at slot {index}, rehomed {rehomed} trailing entries");
        Some(value)
    }

    /// Re-inserts every entry of the occupied run that starts right after `vacated`.
    ///
    /// Each entry is lifted out of its slot and placed at the first vacancy on its own probe
    /// path, carrying its key allocation along. The lifted slot is itself vacant at that
    /// point, so the entry always finds a home and `count` stays untouched.
    fn rehome_after(&mut self, vacated: usize) -> usize {
        let mut rehomed: usize = 0;
        for index in probe_sequence(vacated, self.capacity.get()).skip(1) {
            let Slot::Occupied { key, value } = self.take(index) else {
                break;
            };
            let target = match self.probe(&key) {
                Probe::Vacant { index: target } => target,
                Probe::Found { .. } | Probe::Exhausted => index,
            };
            if target != index {
                trace!("moved entry from slot {index} to slot {target}");
            }
            self.put(target, key, value);
            rehomed = rehomed.saturating_add(1);
        }
        rehomed
    }

    /// Empties `index` and returns what it held
    fn take(&mut self, index: usize) -> Slot<V> {
        self.slots.get_mut(index).map(mem::take).unwrap_or_default()
    }

    /// Stores an entry at `index`, taking ownership of the key copy
    fn put(&mut self, index: usize, key: Box<[u8]>, value: V) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Occupied { key, value };
        }
    }

    /// Value held at `index`, if the slot is occupied
    fn value_at(&self, index: usize) -> Option<&V> {
        match self.slots.get(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty => None,
        }
    }

    /// Mutable value held at `index`, if the slot is occupied
    fn value_mut_at(&mut self, index: usize) -> Option<&mut V> {
        match self.slots.get_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty => None,
        }
    }

    /// Returns the ratio of occupied slots to capacity, always within `0.0..=1.0`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load(&self) -> f64 {
        self.count as f64 / self.capacity.get() as f64
    }

    /// Returns the number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no entry is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the fixed number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of slots a lookup of `key` inspects, or `None` if the key is absent
    #[must_use]
    pub fn probe_length<K: AsRef<[u8]>>(&self, key: K) -> Option<usize> {
        match self.probe(key.as_ref()) {
            Probe::Found { probes, .. } => Some(probes),
            Probe::Vacant { .. } | Probe::Exhausted => None,
        }
    }

    /// Summarises the probe lengths of every stored key
    #[must_use]
    pub fn probe_stats(&self) -> ProbeStats {
        let capacity = self.capacity.get();
        let lengths = self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { key, .. } => {
                Some(probe_distance(hash(key, self.capacity), index, capacity))
            }
            Slot::Empty => None,
        });
        ProbeStats::collect(lengths, self.load())
    }

    /// Returns an iterator over the stored entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }

    /// Removes every entry, keeping the slot array and its capacity
    pub fn clear(&mut self) {
        self.slots.fill_with(Slot::default);
        self.count = 0;
    }

    /// Releases every key copy and the slot array.
    ///
    /// Dropping the map has the same effect; this method only makes the end of its life
    /// explicit at the call site.
    pub fn teardown(self) {
        let released = self.count;
        drop(self);
        debug!("tore down probing map, released {released} keys");
    }
}

impl<'a, V> IntoIterator for &'a ProbingMap<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a `ProbingMap`
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Remaining slots to visit
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self { slots: self.slots.clone() }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((&**key, value)),
            Slot::Empty => None,
        })
    }
}
