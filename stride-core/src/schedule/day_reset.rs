//! End-of-day step reset

use crate::config::ScheduleConfig;
use crate::pedometer::StepCounter;
use crate::state::ClockTick;
use crate::traits::PersistentStore;

/// Resets the step counter at a fixed minute of the day
///
/// There is no memory of previous resets: every tick at the boundary
/// resets, and a boundary minute that never ticks (device off, clock
/// jumped) is not caught up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaryReset {
    hour: u8,
    minute: u8,
}

impl Default for DayBoundaryReset {
    fn default() -> Self {
        Self::new(&ScheduleConfig::default())
    }
}

impl DayBoundaryReset {
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            hour: config.reset_hour,
            minute: config.reset_minute,
        }
    }

    /// Check if `tick` is the reset minute
    pub fn is_boundary(&self, tick: &ClockTick) -> bool {
        tick.hour == self.hour && tick.minute == self.minute
    }

    /// Reset `counter` if `tick` is the reset minute
    ///
    /// Returns true when a reset happened.
    pub fn on_tick<S: PersistentStore>(&self, tick: &ClockTick, counter: &mut StepCounter<S>) -> bool {
        if !self.is_boundary(tick) {
            return false;
        }
        counter.reset();
        true
    }
}
