//! RP2040-specific HAL for the watch firmware
//!
//! This crate provides RP2040 implementations of the shared `stride-hal`
//! traits:
//!
//! - Flash storage driver (implements `stride_hal::FlashStorage`)
//! - Push-pull output adapter (implements `stride_hal::OutputPin`)

#![no_std]

pub mod flash;
pub mod gpio;

// Re-export shared traits from stride-hal for convenience
pub use stride_hal::{FlashStorage as FlashStorageTrait, StorageKey};
