//! Durable integer storage
//!
//! The watch keeps exactly one durable value today (the step count), but
//! the store is keyed so configuration tools can share it.

use heapless::LinearMap;

/// Key identifying a stored integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreKey(pub u8);

impl StoreKey {
    /// Running step count
    pub const STEP_COUNT: StoreKey = StoreKey(1);
}

/// Durable key → integer store
///
/// Reads of a key that was never written return `None`. Writes are
/// infallible from the caller's point of view and complete before
/// returning; implementations backed by flash are expected to cache in RAM
/// and persist asynchronously.
pub trait PersistentStore {
    /// Read the value stored under `key`
    fn get(&self, key: StoreKey) -> Option<i32>;

    /// Store `value` under `key`
    fn set(&mut self, key: StoreKey, value: i32);
}

impl<S: PersistentStore + ?Sized> PersistentStore for &mut S {
    fn get(&self, key: StoreKey) -> Option<i32> {
        (**self).get(key)
    }

    fn set(&mut self, key: StoreKey, value: i32) {
        (**self).set(key, value)
    }
}

/// Number of distinct keys a [`MemoryStore`] can hold
pub const MEMORY_STORE_CAPACITY: usize = 8;

/// In-memory store
///
/// Used in tests and as the RAM cache in front of flash. Once
/// [`MEMORY_STORE_CAPACITY`] keys exist, writes to new keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: LinearMap<StoreKey, i32, MEMORY_STORE_CAPACITY>,
    writes: u32,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: LinearMap::new(),
            writes: 0,
        }
    }

    /// Create a store with one value already present
    pub fn with_value(key: StoreKey, value: i32) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store.writes = 0;
        store
    }

    /// Number of writes since creation
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Check if a key has ever been written
    pub fn contains(&self, key: StoreKey) -> bool {
        self.values.contains_key(&key)
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Option<i32> {
        self.values.get(&key).copied()
    }

    fn set(&mut self, key: StoreKey, value: i32) {
        // Full map: the write is dropped, matching the documented capacity
        let _ = self.values.insert(key, value);
        self.writes = self.writes.saturating_add(1);
    }
}
