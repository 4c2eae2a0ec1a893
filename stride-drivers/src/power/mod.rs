//! Power monitoring

pub mod battery;

pub use battery::{adc_to_millivolts, millivolts_to_percent, BatteryGauge};
