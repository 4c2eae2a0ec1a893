//! Haptic feedback

pub mod vibe;

pub use vibe::{VibeMotor, DOUBLE_PULSE};
