//! Digital outputs
//!
//! The watch drives a single push-pull output today, the vibration motor
//! transistor. Drivers take this trait so patterns can be checked against
//! a mock pin on the host.

/// Push-pull output
pub trait OutputPin {
    /// Drive the pin to logic 1
    fn set_high(&mut self);

    /// Drive the pin to logic 0
    fn set_low(&mut self);

    /// Drive the pin to `high`
    fn set_state(&mut self, high: bool) {
        match high {
            true => self.set_high(),
            false => self.set_low(),
        }
    }

    /// Level last written to the pin
    fn is_set_high(&self) -> bool;
}
