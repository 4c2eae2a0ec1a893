//! Events delivered to handlers

use stride_protocol::WeatherReport;

use super::clock::ClockTick;
use crate::pedometer::AccelBatch;

/// Everything the watch reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle
    /// Face loaded; handlers announce their initial state
    Started,

    // Sensor and clock
    /// Accelerometer batch from the sensor layer
    AccelBatch(AccelBatch),
    /// Wall clock crossed a minute boundary
    MinuteTick(ClockTick),

    // Derived
    /// Step count may have changed
    StepCount(u32),

    // Status
    /// Phone connection changed (true = connected)
    Connection(bool),
    /// Battery charge in percent
    Battery(u8),
    /// Weather data from the phone
    Weather(WeatherReport),
}

impl Event {
    /// Check if this event comes from a device sensor or the clock
    ///
    /// These arrive continuously, so the firmware keeps them out of debug logs.
    pub fn is_sensor_event(&self) -> bool {
        matches!(self, Event::AccelBatch(_) | Event::MinuteTick(_) | Event::Battery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_events() {
        assert!(Event::AccelBatch(AccelBatch::new()).is_sensor_event());
        assert!(Event::MinuteTick(ClockTick::at(1, 2)).is_sensor_event());
        assert!(Event::Battery(80).is_sensor_event());
        assert!(!Event::Started.is_sensor_event());
        assert!(!Event::Connection(false).is_sensor_event());
        assert!(!Event::Weather(WeatherReport::default()).is_sensor_event());
    }
}
