//! Step detection
//!
//! Turns accelerometer samples into credited steps. A sample is credited
//! only when it moved far enough from the previous sample, is strong
//! enough on its own, was not taken while the vibration motor ran, and
//! falls outside the debounce window of the last credited step.

use heapless::Vec;

use crate::config::{PedometerConfig, MAX_BATCH_SAMPLES};

/// One accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    /// Signed axis reading (milli-g)
    pub magnitude: i16,
    /// The vibration motor was running while this sample was taken
    pub did_vibrate: bool,
    /// Sample time (firmware milliseconds since boot)
    pub timestamp: i64,
}

impl AccelSample {
    pub const fn new(magnitude: i16, did_vibrate: bool, timestamp: i64) -> Self {
        Self {
            magnitude,
            did_vibrate,
            timestamp,
        }
    }
}

/// A batch of samples as delivered by the sensor layer
pub type AccelBatch = Vec<AccelSample, MAX_BATCH_SAMPLES>;

/// Detector memory carried between samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorState {
    /// Magnitude of the most recently processed sample
    pub last_magnitude: i32,
    /// Timestamp of the last credited step (`None` until the first sample)
    pub last_step_timestamp: Option<i64>,
}

/// Outcome of evaluating one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepVerdict {
    /// All rules held; the step is credited
    Credited,
    /// Change from the previous sample too small
    SmallDelta,
    /// Absolute magnitude too small
    BelowThreshold,
    /// Taken while the vibration motor ran
    Vibrating,
    /// Inside the debounce window (or time went backwards)
    TooSoon,
}

impl StepVerdict {
    pub fn is_credited(&self) -> bool {
        matches!(self, StepVerdict::Credited)
    }
}

/// Threshold-and-debounce step detector
#[derive(Debug, Clone)]
pub struct StepDetector {
    min_diff: i32,
    step_threshold: i32,
    min_time_diff: i64,
    step_increment: u32,
    state: DetectorState,
}

impl StepDetector {
    /// Create a detector with fresh state
    pub fn new(config: &PedometerConfig) -> Self {
        Self {
            min_diff: config.min_diff as i32,
            step_threshold: config.step_threshold as i32,
            min_time_diff: config.min_time_diff as i64,
            step_increment: config.step_increment as u32,
            state: DetectorState::default(),
        }
    }

    /// Current detector memory
    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Steps credited for each detection
    pub fn step_increment(&self) -> u32 {
        self.step_increment
    }

    /// Evaluate a sample and update state
    ///
    /// The first sample ever seen seeds the step timestamp before
    /// evaluation, so it always lands inside the debounce window.
    pub fn classify(&mut self, sample: &AccelSample) -> StepVerdict {
        let magnitude = sample.magnitude as i32;
        let last_step = *self.state.last_step_timestamp.get_or_insert(sample.timestamp);

        let verdict = if (magnitude - self.state.last_magnitude).abs() <= self.min_diff {
            StepVerdict::SmallDelta
        } else if magnitude.abs() <= self.step_threshold {
            StepVerdict::BelowThreshold
        } else if sample.did_vibrate {
            StepVerdict::Vibrating
        } else if sample.timestamp.saturating_sub(last_step) <= self.min_time_diff {
            StepVerdict::TooSoon
        } else {
            StepVerdict::Credited
        };

        if verdict.is_credited() {
            self.state.last_step_timestamp = Some(sample.timestamp);
        }
        self.state.last_magnitude = magnitude;

        verdict
    }

    /// Process one sample, returning the steps credited (0 or the increment)
    pub fn process(&mut self, sample: &AccelSample) -> u32 {
        if self.classify(sample).is_credited() {
            self.step_increment
        } else {
            0
        }
    }

    /// Process a delivered batch
    ///
    /// Only the first sample is examined; the rest of the batch is
    /// discarded. An empty batch credits nothing and leaves state alone.
    pub fn process_batch(&mut self, batch: &[AccelSample]) -> u32 {
        match batch.first() {
            Some(sample) => self.process(sample),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> StepDetector {
        StepDetector::new(&PedometerConfig::default())
    }

    fn sample(magnitude: i16, timestamp: i64) -> AccelSample {
        AccelSample::new(magnitude, false, timestamp)
    }

    #[test]
    fn test_first_sample_never_credits() {
        let mut d = detector();
        assert_eq!(d.classify(&sample(1000, 0)), StepVerdict::TooSoon);
        assert_eq!(d.state().last_step_timestamp, Some(0));
        assert_eq!(d.state().last_magnitude, 1000);
    }

    #[test]
    fn test_spaced_samples_scenario() {
        let mut d = detector();
        // A: seeds timestamp, debounce diff is 0
        assert_eq!(d.process(&sample(1000, 0)), 0);
        // B: magnitude swing of 2000 after 200 ms
        assert_eq!(d.process(&sample(-1000, 200)), 1);
        assert_eq!(d.state().last_step_timestamp, Some(200));
        // C: only 100 ms after B
        assert_eq!(d.classify(&sample(1000, 300)), StepVerdict::TooSoon);
        assert_eq!(d.state().last_magnitude, 1000);
        assert_eq!(d.state().last_step_timestamp, Some(200));
    }

    #[test]
    fn test_vibrating_sample_never_credits() {
        let mut d = detector();
        d.process(&sample(0, 0));
        let shaken = AccelSample::new(2000, true, 1000);
        assert_eq!(d.classify(&shaken), StepVerdict::Vibrating);
        assert_eq!(d.state().last_magnitude, 2000);
        assert_eq!(d.state().last_step_timestamp, Some(0));
    }

    #[test]
    fn test_small_delta_and_threshold() {
        let mut d = detector();
        d.process(&sample(0, 0));
        // Delta exactly 400 is not enough
        assert_eq!(d.classify(&sample(400, 1000)), StepVerdict::SmallDelta);
        // Big swing but |m| = 200
        assert_eq!(d.classify(&sample(-200, 2000)), StepVerdict::BelowThreshold);
        assert_eq!(d.classify(&sample(-550, 3000)), StepVerdict::SmallDelta);
        assert_eq!(d.classify(&sample(0, 4000)), StepVerdict::BelowThreshold);
        // Threshold is strict
        assert_eq!(d.classify(&sample(-550, 5000)), StepVerdict::BelowThreshold);
        assert_eq!(d.classify(&sample(551, 6000)), StepVerdict::Credited);
    }

    #[test]
    fn test_debounce_boundary() {
        let mut d = detector();
        d.process(&sample(0, 0));
        // Exactly 150 after the seeded timestamp is still inside the window
        assert_eq!(d.classify(&sample(800, 150)), StepVerdict::TooSoon);
        assert_eq!(d.classify(&sample(-800, 151)), StepVerdict::Credited);
    }

    #[test]
    fn test_backwards_timestamp_rejected() {
        let mut d = detector();
        d.process(&sample(0, 1000));
        assert_eq!(d.process(&sample(900, 2000)), 1);
        assert_eq!(d.classify(&sample(-900, 100)), StepVerdict::TooSoon);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let mut d = detector();
        d.process(&sample(i16::MAX, 0));
        assert_eq!(d.process(&sample(i16::MIN, 1000)), 1);
        assert_eq!(d.state().last_magnitude, i16::MIN as i32);
    }

    #[test]
    fn test_batch_uses_first_sample_only() {
        let mut d = detector();
        d.process(&sample(0, 0));

        let batch = [sample(0, 1000), sample(2000, 1100), sample(-2000, 1200)];
        assert_eq!(d.process_batch(&batch), 0);
        assert_eq!(d.state().last_magnitude, 0);
    }

    #[test]
    fn test_empty_batch_leaves_state() {
        let mut d = detector();
        d.process(&sample(700, 50));
        let before = d.state();
        assert_eq!(d.process_batch(&[]), 0);
        assert_eq!(d.state(), before);
    }

    #[test]
    fn test_custom_increment() {
        let config = PedometerConfig {
            step_increment: 2,
            ..PedometerConfig::default()
        };
        let mut d = StepDetector::new(&config);
        d.process(&sample(0, 0));
        assert_eq!(d.process(&sample(1000, 500)), 2);
    }

    proptest::proptest! {
        #[test]
        fn prop_vibrating_never_credits(
            samples in proptest::collection::vec((proptest::num::i16::ANY, 0i64..10_000), 1..64)
        ) {
            let mut d = detector();
            for (m, t) in samples {
                proptest::prop_assert_eq!(d.process(&AccelSample::new(m, true, t)), 0);
                proptest::prop_assert_eq!(d.state().last_magnitude, m as i32);
            }
        }

        #[test]
        fn prop_credits_are_spaced(
            samples in proptest::collection::vec((proptest::num::i16::ANY, 1i64..400), 1..128)
        ) {
            let mut d = detector();
            let mut now = 0i64;
            let mut last_credit: Option<i64> = None;
            for (m, dt) in samples {
                now += dt;
                if d.process(&sample(m, now)) > 0 {
                    if let Some(prev) = last_credit {
                        proptest::prop_assert!(now - prev > 150);
                    }
                    last_credit = Some(now);
                }
            }
        }
    }
}
