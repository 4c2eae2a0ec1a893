//! Software wall clock
//!
//! The phone sets the time with a [`ClockSync`]; the tick task then
//! advances it from the monotonic timer. Until the first sync the watch
//! has no wall time and produces no minute ticks.

use stride_core::state::{CalendarDate, ClockTick};
use stride_protocol::ClockSync;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Local calendar time with one-second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    year: u16,
    month: u8,
    day: u8,
    /// 0 = Sunday
    weekday: u8,
    second_of_day: u32,
}

impl WallClock {
    pub fn from_sync(sync: &ClockSync) -> Self {
        Self {
            year: sync.year,
            month: sync.month,
            day: sync.day,
            weekday: sync.weekday,
            second_of_day: sync.hour as u32 * 3600 + sync.minute as u32 * 60 + sync.second as u32,
        }
    }

    /// Move the clock forward, rolling over days, months and years
    pub fn advance(&mut self, seconds: u64) {
        let total = self.second_of_day as u64 + seconds;
        self.second_of_day = (total % SECONDS_PER_DAY) as u32;
        for _ in 0..total / SECONDS_PER_DAY {
            self.next_day();
        }
    }

    fn next_day(&mut self) {
        self.weekday = (self.weekday + 1) % 7;
        self.day += 1;
        if self.day > days_in_month(self.year, self.month) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year = self.year.wrapping_add(1);
            }
        }
    }

    pub fn hour(&self) -> u8 {
        (self.second_of_day / 3600) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.second_of_day / 60 % 60) as u8
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Minute tick for the current time
    pub fn tick(&self) -> ClockTick {
        ClockTick::at(self.hour(), self.minute()).with_date(CalendarDate {
            weekday: self.weekday,
            month: self.month,
            day: self.day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> ClockSync {
        ClockSync {
            year,
            month,
            day,
            weekday: 1,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn test_from_sync() {
        let clock = WallClock::from_sync(&sync(2026, 10, 19, 10, 42, 7));
        let tick = clock.tick();
        assert_eq!((tick.hour, tick.minute), (10, 42));
        assert_eq!(tick.date.weekday_abbrev(), "Mon");
        assert_eq!(tick.date.month_abbrev(), "Oct");
        assert_eq!(tick.date.day, 19);
    }

    #[test]
    fn test_advance_within_day() {
        let mut clock = WallClock::from_sync(&sync(2026, 10, 19, 23, 58, 59));
        clock.advance(1);
        assert_eq!((clock.hour(), clock.minute()), (23, 59));
        clock.advance(59);
        assert_eq!((clock.hour(), clock.minute()), (23, 59));
        assert_eq!(clock.tick().date.day, 19);
    }

    #[test]
    fn test_midnight_rollover() {
        let mut clock = WallClock::from_sync(&sync(2026, 12, 31, 23, 59, 30));
        clock.advance(30);
        let tick = clock.tick();
        assert_eq!((tick.hour, tick.minute), (0, 0));
        assert_eq!((tick.date.month, tick.date.day, tick.date.weekday), (1, 1, 2));
        assert_eq!(clock.year(), 2027);
    }

    #[test]
    fn test_leap_february() {
        let mut clock = WallClock::from_sync(&sync(2028, 2, 28, 12, 0, 0));
        clock.advance(SECONDS_PER_DAY);
        assert_eq!(clock.tick().date.day, 29);
        clock.advance(SECONDS_PER_DAY);
        assert_eq!((clock.tick().date.month, clock.tick().date.day), (3, 1));

        let mut clock = WallClock::from_sync(&sync(2100, 2, 28, 12, 0, 0));
        clock.advance(SECONDS_PER_DAY);
        assert_eq!((clock.tick().date.month, clock.tick().date.day), (3, 1));
    }

    #[test]
    fn test_weekday_wraps() {
        let mut clock = WallClock::from_sync(&ClockSync {
            weekday: 6,
            ..sync(2026, 10, 24, 0, 0, 0)
        });
        clock.advance(SECONDS_PER_DAY);
        assert_eq!(clock.tick().date.weekday_abbrev(), "Sun");
    }
}
