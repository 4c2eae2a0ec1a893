//! Configuration loading
//!
//! Loads the watch configuration and the saved step count from flash,
//! falling back to defaults on a blank or unreadable device.

pub mod loader;

pub use loader::{ConfigLoadError, ConfigPersistence};
