//! Configuration type definitions
//!
//! These types represent the watch configuration. Configuration is stored
//! in flash as postcard-serialized binary data; every field has a default
//! so a blank device behaves exactly like a configured one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Largest batch the sensor layer may deliver
pub const MAX_BATCH_SAMPLES: usize = 25;

/// Errors found while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A detection threshold or the step increment is zero
    InvalidThreshold,
    /// Samples per batch outside 1..=MAX_BATCH_SAMPLES
    InvalidBatchSize,
    /// Daily reset time is not a valid hh:mm
    InvalidResetTime,
    /// Refresh interval does not divide an hour evenly
    InvalidRefreshInterval,
    /// Stored layout version is not understood
    UnsupportedVersion,
}

/// Accelerometer sampling rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleRate {
    #[default]
    Hz10,
    Hz25,
    Hz50,
    Hz100,
}

impl SampleRate {
    /// Rate in Hz
    pub const fn hz(self) -> u32 {
        match self {
            SampleRate::Hz10 => 10,
            SampleRate::Hz25 => 25,
            SampleRate::Hz50 => 50,
            SampleRate::Hz100 => 100,
        }
    }

    /// Time between samples in milliseconds
    pub const fn period_ms(self) -> u32 {
        1000 / self.hz()
    }
}

/// Step detection tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PedometerConfig {
    /// Minimum change from the previous sample (milli-g)
    pub min_diff: u16,
    /// Minimum absolute magnitude of a step sample (milli-g)
    pub step_threshold: u16,
    /// Debounce window between credited steps, in sample timestamp units
    pub min_time_diff: u32,
    /// Steps credited per detection
    pub step_increment: u16,
    /// Samples per delivered batch (only the first is examined)
    pub samples_per_batch: u8,
    /// Accelerometer sampling rate
    pub sample_rate: SampleRate,
}

impl Default for PedometerConfig {
    fn default() -> Self {
        Self {
            min_diff: 400,
            step_threshold: 550,
            min_time_diff: 150,
            step_increment: 1,
            samples_per_batch: 5,
            sample_rate: SampleRate::Hz10,
        }
    }
}

/// Clock-driven schedule settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    /// Hour of the daily step reset
    pub reset_hour: u8,
    /// Minute of the daily step reset
    pub reset_minute: u8,
    /// Minutes between weather requests (must divide 60)
    pub refresh_interval_min: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            reset_hour: 23,
            reset_minute: 59,
            refresh_interval_min: 30,
        }
    }
}

/// Temperature unit shown on the face
///
/// The phone converts before sending; this only selects the suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub const fn suffix(self) -> char {
        match self {
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Celsius => 'C',
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Show 24-hour time instead of 12-hour
    pub clock_24h: bool,
    pub temperature_unit: TemperatureUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clock_24h: true,
            temperature_unit: TemperatureUnit::Fahrenheit,
        }
    }
}

/// Complete watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    /// Layout version (see [`CONFIG_VERSION`])
    pub version: u8,
    pub pedometer: PedometerConfig,
    pub schedule: ScheduleConfig,
    pub display: DisplayConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            pedometer: PedometerConfig::default(),
            schedule: ScheduleConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl WatchConfig {
    /// Check every field for a usable value
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion);
        }

        let p = &self.pedometer;
        if p.min_diff == 0 || p.step_threshold == 0 || p.step_increment == 0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if p.samples_per_batch == 0 || p.samples_per_batch as usize > MAX_BATCH_SAMPLES {
            return Err(ConfigError::InvalidBatchSize);
        }

        let s = &self.schedule;
        if s.reset_hour > 23 || s.reset_minute > 59 {
            return Err(ConfigError::InvalidResetTime);
        }
        if s.refresh_interval_min == 0 || 60 % s.refresh_interval_min != 0 {
            return Err(ConfigError::InvalidRefreshInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WatchConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.pedometer.min_diff, 400);
        assert_eq!(config.pedometer.step_threshold, 550);
        assert_eq!(config.pedometer.min_time_diff, 150);
        assert_eq!(config.schedule.refresh_interval_min, 30);
    }

    #[test]
    fn test_sample_rate_period() {
        assert_eq!(SampleRate::Hz10.period_ms(), 100);
        assert_eq!(SampleRate::Hz25.period_ms(), 40);
        assert_eq!(SampleRate::Hz100.period_ms(), 10);
    }

    #[test]
    fn test_refresh_interval_must_divide_hour() {
        let mut config = WatchConfig::default();
        for ok in [1, 5, 15, 20, 30, 60] {
            config.schedule.refresh_interval_min = ok;
            assert_eq!(config.validate(), Ok(()));
        }
        for bad in [0, 7, 25, 45, 90] {
            config.schedule.refresh_interval_min = bad;
            assert_eq!(config.validate(), Err(ConfigError::InvalidRefreshInterval));
        }
    }

    #[test]
    fn test_invalid_fields() {
        let mut config = WatchConfig::default();
        config.pedometer.step_increment = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold));

        let mut config = WatchConfig::default();
        config.pedometer.samples_per_batch = 26;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBatchSize));

        let mut config = WatchConfig::default();
        config.schedule.reset_hour = 24;
        assert_eq!(config.validate(), Err(ConfigError::InvalidResetTime));

        let config = WatchConfig {
            version: 0,
            ..WatchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedVersion));
    }

    #[test]
    fn test_temperature_suffix() {
        assert_eq!(TemperatureUnit::Fahrenheit.suffix(), 'F');
        assert_eq!(TemperatureUnit::Celsius.suffix(), 'C');
    }
}
