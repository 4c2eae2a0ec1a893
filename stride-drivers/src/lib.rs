//! Hardware driver implementations
//!
//! This crate provides the drivers behind the watch's sensors and
//! outputs, written against `embedded-hal-async` and the `stride-hal`
//! traits so they can be exercised on the host:
//!
//! - Accelerometer (LIS3DH over I2C) and sample batching
//! - Vibration motor patterns
//! - Battery gauge (VSYS millivolts to percent)
//! - OLED panel (SH1106 over I2C) implementing `DisplayBackend`

#![no_std]
#![deny(unsafe_code)]

pub mod accel;
pub mod display;
pub mod haptics;
pub mod power;
