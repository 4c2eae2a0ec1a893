//! Pedometer
//!
//! Combines the step detector, the persisted counter and the end-of-day
//! reset into one event handler.

pub mod counter;
pub mod detector;

pub use counter::StepCounter;
pub use detector::{AccelBatch, AccelSample, DetectorState, StepDetector, StepVerdict};

use crate::config::WatchConfig;
use crate::schedule::DayBoundaryReset;
use crate::state::{ClockTick, Emitter, Event, EventHandler};
use crate::traits::PersistentStore;

/// Step counting handler
///
/// Emits [`Event::StepCount`] on startup, after every credited step and
/// after each daily reset.
pub struct Pedometer<S> {
    detector: StepDetector,
    counter: StepCounter<S>,
    day_reset: DayBoundaryReset,
}

impl<S: PersistentStore> Pedometer<S> {
    pub fn new(config: &WatchConfig, store: S) -> Self {
        Self {
            detector: StepDetector::new(&config.pedometer),
            counter: StepCounter::new(store),
            day_reset: DayBoundaryReset::new(&config.schedule),
        }
    }

    /// Feed a sensor batch; returns the new count if a step was credited
    pub fn on_batch(&mut self, batch: &[AccelSample]) -> Option<u32> {
        match self.detector.process_batch(batch) {
            0 => None,
            steps => Some(self.counter.increment(steps)),
        }
    }

    /// Feed a minute tick; returns true if the count was reset
    pub fn on_tick(&mut self, tick: &ClockTick) -> bool {
        self.day_reset.on_tick(tick, &mut self.counter)
    }

    /// Current persisted count
    pub fn steps(&self) -> u32 {
        self.counter.current_value()
    }

    pub fn detector(&self) -> &StepDetector {
        &self.detector
    }

    pub fn counter(&self) -> &StepCounter<S> {
        &self.counter
    }
}

impl<S: PersistentStore> EventHandler for Pedometer<S> {
    fn handle(&mut self, event: &Event, emitter: &mut Emitter) {
        match event {
            Event::Started => {
                emitter.emit(Event::StepCount(self.steps()));
            }
            Event::AccelBatch(batch) => {
                if let Some(count) = self.on_batch(batch) {
                    emitter.emit(Event::StepCount(count));
                }
            }
            Event::MinuteTick(tick) => {
                if self.on_tick(tick) {
                    #[cfg(feature = "defmt")]
                    defmt::info!("daily step reset");
                    emitter.emit(Event::StepCount(0));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MemoryStore, StoreKey};

    fn batch(samples: &[AccelSample]) -> AccelBatch {
        AccelBatch::from_slice(samples).unwrap()
    }

    #[test]
    fn test_started_announces_persisted_count() {
        let mut pedometer = Pedometer::new(
            &WatchConfig::default(),
            MemoryStore::with_value(StoreKey::STEP_COUNT, 1234),
        );
        let mut emitter = Emitter::new();
        pedometer.handle(&Event::Started, &mut emitter);
        assert_eq!(emitter.events(), &[Event::StepCount(1234)]);
    }

    #[test]
    fn test_credited_batch_emits_count() {
        let mut pedometer = Pedometer::new(&WatchConfig::default(), MemoryStore::new());
        let mut emitter = Emitter::new();

        pedometer.handle(
            &Event::AccelBatch(batch(&[AccelSample::new(1000, false, 0)])),
            &mut emitter,
        );
        assert!(emitter.events().is_empty());

        pedometer.handle(
            &Event::AccelBatch(batch(&[
                AccelSample::new(-1000, false, 200),
                AccelSample::new(1000, false, 300),
            ])),
            &mut emitter,
        );
        assert_eq!(emitter.events(), &[Event::StepCount(1)]);
        assert_eq!(pedometer.steps(), 1);
    }

    #[test]
    fn test_reset_tick_emits_zero() {
        let mut pedometer = Pedometer::new(
            &WatchConfig::default(),
            MemoryStore::with_value(StoreKey::STEP_COUNT, 7),
        );
        let mut emitter = Emitter::new();
        pedometer.handle(&Event::MinuteTick(ClockTick::at(23, 58)), &mut emitter);
        assert!(emitter.events().is_empty());
        assert_eq!(pedometer.steps(), 7);

        pedometer.handle(&Event::MinuteTick(ClockTick::at(23, 59)), &mut emitter);
        assert_eq!(emitter.events(), &[Event::StepCount(0)]);
        assert_eq!(pedometer.steps(), 0);
    }

    #[test]
    fn test_vibration_filtered() {
        let mut pedometer = Pedometer::new(&WatchConfig::default(), MemoryStore::new());
        let mut t = 0;
        for i in 0..20 {
            let m = if i % 2 == 0 { 1500 } else { -1500 };
            assert_eq!(pedometer.on_batch(&[AccelSample::new(m, true, t)]), None);
            t += 500;
        }
        assert_eq!(pedometer.steps(), 0);
    }

    #[test]
    fn test_other_events_ignored() {
        let mut pedometer = Pedometer::new(&WatchConfig::default(), MemoryStore::new());
        let mut emitter = Emitter::new();
        pedometer.handle(&Event::Connection(false), &mut emitter);
        pedometer.handle(&Event::Battery(40), &mut emitter);
        pedometer.handle(&Event::StepCount(99), &mut emitter);
        assert!(emitter.events().is_empty());
        assert_eq!(pedometer.counter().store().writes(), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_count_matches_credited_steps(
            samples in proptest::collection::vec(
                (proptest::num::i16::ANY, proptest::bool::ANY, 0i64..400),
                1..200,
            ),
            start in 0u32..10_000,
        ) {
            let mut pedometer = Pedometer::new(
                &WatchConfig::default(),
                MemoryStore::with_value(StoreKey::STEP_COUNT, start as i32),
            );
            let mut reference = StepDetector::new(&WatchConfig::default().pedometer);
            let mut expected = start;
            let mut previous = start;
            let mut now = 0i64;

            for (m, vibrating, dt) in samples {
                now += dt;
                let sample = AccelSample::new(m, vibrating, now);
                expected += reference.process(&sample);
                pedometer.on_batch(&[sample]);

                let steps = pedometer.steps();
                proptest::prop_assert!(steps >= previous);
                previous = steps;
            }
            proptest::prop_assert_eq!(pedometer.steps(), expected);
        }
    }
}
