//! Collaborator abstraction traits
//!
//! These traits define the interface between the core logic and the
//! surrounding device: durable storage and the phone link.

pub mod link;
pub mod store;

pub use link::{LinkError, WeatherLink};
pub use store::{MemoryStore, PersistentStore, StoreKey, MEMORY_STORE_CAPACITY};
