//! Display abstraction and watchface rendering for Stride
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display types
//! - `Screen`, a character grid sized for a 128x64 panel with a 5x8 font
//! - `Watchface`, the event handler that lays out steps, battery, clock,
//!   connection state and weather on the screen
//!
//! The firmware owns the physical panel; it renders the `Screen` into any
//! `DisplayBackend` whenever the watchface marks it dirty.

#![no_std]

pub mod backend;
pub mod screen;
pub mod watchface;

pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Align, Screen, LINE_CAPACITY, SCREEN_COLS, SCREEN_ROWS};
pub use watchface::{rows, Watchface};
