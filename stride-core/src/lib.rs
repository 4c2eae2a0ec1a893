//! Board-agnostic core logic for the pedometer watchface
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Step detection (accelerometer thresholding and debouncing)
//! - Persisted step counter with its daily reset
//! - Weather refresh scheduling aligned to the wall clock
//! - Single-threaded event dispatch
//! - Storage and link abstraction traits
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod pedometer;
pub mod schedule;
pub mod state;
pub mod traits;
