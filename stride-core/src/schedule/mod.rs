//! Clock-driven schedules
//!
//! Both schedules react to minute ticks only: the daily step reset and
//! the periodic weather refresh.

pub mod day_reset;
pub mod refresh;

pub use day_reset::DayBoundaryReset;
pub use refresh::{anchor_for, RefreshScheduler, ScheduleState};
