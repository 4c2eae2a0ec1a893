//! Phone link trait

/// Errors reported by the phone link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Outbound queue is full
    Busy,
    /// No phone connected
    Disconnected,
}

/// Outbound channel for the weather request trigger
///
/// Sending must not block. Implementations queue the request and report
/// only immediate failures; delivery is not confirmed back to the caller.
pub trait WeatherLink {
    /// Emit one weather request to the phone
    fn request_weather(&mut self) -> Result<(), LinkError>;
}

impl<L: WeatherLink + ?Sized> WeatherLink for &mut L {
    fn request_weather(&mut self) -> Result<(), LinkError> {
        (**self).request_weather()
    }
}
