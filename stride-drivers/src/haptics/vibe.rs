//! Vibration motor
//!
//! Patterns are lists of segment durations in milliseconds, alternating
//! on and off and starting with on. The motor does not own a timer: the
//! caller advances it segment by segment and waits out each duration.

use stride_hal::OutputPin;

/// Two buzzes, used for the disconnect alert
pub const DOUBLE_PULSE: &[u32] = &[200, 100, 200];

/// Pattern-driven vibration motor
pub struct VibeMotor<P> {
    pin: P,
    pattern: &'static [u32],
    position: usize,
}

impl<P: OutputPin> VibeMotor<P> {
    /// Create a new motor, initially off
    pub fn new(mut pin: P) -> Self {
        pin.set_low();
        Self {
            pin,
            pattern: &[],
            position: 0,
        }
    }

    /// Start `pattern`, replacing any pattern in progress
    pub fn start(&mut self, pattern: &'static [u32]) {
        self.pattern = pattern;
        self.position = 0;
        self.pin.set_low();
    }

    /// Enter the next segment
    ///
    /// Drives the pin for that segment and returns how long to hold it.
    /// Returns `None` (with the motor off) when the pattern is finished.
    pub fn advance(&mut self) -> Option<u32> {
        let Some(&duration) = self.pattern.get(self.position) else {
            self.stop();
            return None;
        };
        self.pin.set_state(self.position % 2 == 0);
        self.position += 1;
        Some(duration)
    }

    /// Abort any pattern and switch the motor off
    pub fn stop(&mut self) {
        self.pattern = &[];
        self.position = 0;
        self.pin.set_low();
    }

    /// Check if the motor is running right now
    pub fn is_vibrating(&self) -> bool {
        self.pin.is_set_high()
    }

    /// Check if a pattern is still being played
    pub fn is_active(&self) -> bool {
        self.position < self.pattern.len() || self.is_vibrating()
    }
}
