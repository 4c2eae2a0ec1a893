//! Persisted step counter
//!
//! The count lives in the store, not in this struct: every operation reads
//! through to the store so a restart picks up exactly what was last written.

use crate::traits::{PersistentStore, StoreKey};

/// Step count backed by a durable store
#[derive(Debug)]
pub struct StepCounter<S> {
    store: S,
    key: StoreKey,
}

impl<S: PersistentStore> StepCounter<S> {
    /// Counter under [`StoreKey::STEP_COUNT`]
    pub fn new(store: S) -> Self {
        Self::with_key(store, StoreKey::STEP_COUNT)
    }

    pub fn with_key(store: S, key: StoreKey) -> Self {
        Self { store, key }
    }

    /// Read the stored count
    ///
    /// A missing key reads as 0, as does a negative value left by an
    /// older writer.
    pub fn current_value(&self) -> u32 {
        self.store
            .get(self.key)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    /// Add `steps` and persist the result
    ///
    /// Saturates at the largest value the store can hold.
    pub fn increment(&mut self, steps: u32) -> u32 {
        let next = self.current_value().saturating_add(steps).min(i32::MAX as u32);
        self.store.set(self.key, next as i32);
        next
    }

    /// Set the count to zero
    pub fn reset(&mut self) {
        self.store.set(self.key, 0);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
