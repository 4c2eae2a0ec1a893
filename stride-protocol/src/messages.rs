//! Message types for the watch ↔ phone link
//!
//! Message types are divided into two categories:
//! - Watch → Phone: the weather request trigger
//! - Phone → Watch: weather readings and clock synchronisation

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum length of any text field (conditions, city name)
pub const MAX_TEXT_LEN: usize = 32;

/// Bounded text carried in messages
pub type Text = String<MAX_TEXT_LEN>;

/// Copy `s` into a [`Text`], truncating at a character boundary
pub fn text(s: &str) -> Text {
    let mut out = Text::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Messages from the watch to the phone
///
/// The weather request is a bare marker: postcard encodes it as the single
/// byte `0x00` and the phone reacts to its arrival, not to any payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Ask the phone to fetch current weather and forecast
    WeatherRequest,
}

/// Messages from the phone to the watch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Weather readings (any subset may be present)
    Weather(WeatherReport),
    /// Set the watch's wall clock
    ClockSync(ClockSync),
}

/// A temperature with its short condition text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperature in the phone's display unit
    pub temperature: i32,
    /// Condition text ("Clear", "light rain", ...)
    pub conditions: Text,
}

impl Reading {
    /// Create a reading, truncating the condition text if needed
    pub fn new(temperature: i32, conditions: &str) -> Self {
        Self {
            temperature,
            conditions: text(conditions),
        }
    }
}

/// Weather response from the phone
///
/// The phone sends current conditions and the forecast as separate
/// messages, so every field is optional. Consumers update only what is
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport {
    /// Current conditions
    pub current: Option<Reading>,
    /// Forecast a few hours out
    pub three_hour: Option<Reading>,
    /// Forecast for tomorrow morning
    pub next_morning: Option<Reading>,
    /// Forecast for tomorrow evening
    pub next_evening: Option<Reading>,
    /// City the forecast applies to
    pub city: Option<Text>,
}

impl WeatherReport {
    /// Check if the report carries no data at all
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.three_hour.is_none()
            && self.next_morning.is_none()
            && self.next_evening.is_none()
            && self.city.is_none()
    }
}

/// Wall clock time pushed by the phone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSync {
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub day: u8,
    /// Day of week, 0 = Sunday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockSync {
    /// Check that every field is within its calendar range
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.weekday < 7
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_request_is_single_marker_byte() {
        let mut buf = [0xFFu8; 8];
        let used = postcard::to_slice(&WatchMessage::WeatherRequest, &mut buf).unwrap();
        assert_eq!(used, &[0x00]);
    }

    #[test]
    fn test_text_truncates_on_char_boundary() {
        let long = "é".repeat(40); // 2 bytes per char
        let t = text(&long);
        assert!(t.len() <= MAX_TEXT_LEN);
        assert_eq!(t.chars().count(), MAX_TEXT_LEN / 2);
    }

    #[test]
    fn test_report_is_empty() {
        let mut report = WeatherReport::default();
        assert!(report.is_empty());

        report.city = Some(text("Paris"));
        assert!(!report.is_empty());
    }

    #[test]
    fn test_clock_sync_validation() {
        let sync = ClockSync {
            year: 2024,
            month: 10,
            day: 19,
            weekday: 6,
            hour: 23,
            minute: 59,
            second: 0,
        };
        assert!(sync.is_valid());

        assert!(!ClockSync { hour: 24, ..sync }.is_valid());
        assert!(!ClockSync { month: 0, ..sync }.is_valid());
        assert!(!ClockSync { weekday: 7, ..sync }.is_valid());
    }
}
