//! RAM-cached persistent store
//!
//! The pedometer writes its count through [`PersistentStore`] on every
//! credited step. Flash writes are async and slow, so values live in RAM
//! and each write only publishes the value and queues a save request for
//! the persist task.

use defmt::*;
use portable_atomic::Ordering;

use stride_core::traits::{MemoryStore, PersistentStore, StoreKey};

use crate::channels::{SaveRequest, SAVE_CHANNEL, STEP_COUNT};

/// Store backed by RAM, flushed to flash by the persist task
pub struct CachedStore {
    cache: MemoryStore,
}

impl CachedStore {
    /// Create a store seeded with the step count read at boot
    pub fn new(step_count: i32) -> Self {
        STEP_COUNT.store(step_count, Ordering::Relaxed);
        Self {
            cache: MemoryStore::with_value(StoreKey::STEP_COUNT, step_count),
        }
    }
}

/// Save request for a new step count
///
/// A reset is written at once so a power loss right after the reset cannot
/// bring back yesterday's count; ordinary steps are debounced.
pub fn save_request_for(value: i32) -> SaveRequest {
    if value == 0 {
        SaveRequest::Immediate
    } else {
        SaveRequest::Schedule
    }
}

impl PersistentStore for CachedStore {
    fn get(&self, key: StoreKey) -> Option<i32> {
        self.cache.get(key)
    }

    fn set(&mut self, key: StoreKey, value: i32) {
        self.cache.set(key, value);
        if key != StoreKey::STEP_COUNT {
            return;
        }
        STEP_COUNT.store(value, Ordering::Relaxed);
        // A full channel already holds a pending save, which reads the
        // latest value when it runs
        if SAVE_CHANNEL.try_send(save_request_for(value)).is_err() {
            trace!("Save already pending");
        }
    }
}
