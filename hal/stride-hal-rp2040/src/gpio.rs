//! GPIO adapters

use embassy_rp::gpio::Output;

/// Embassy output pin behind the `stride_hal::OutputPin` trait
pub struct Rp2040OutputPin<'d> {
    pin: Output<'d>,
}

impl<'d> Rp2040OutputPin<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl stride_hal::OutputPin for Rp2040OutputPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
