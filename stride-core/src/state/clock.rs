//! Wall clock ticks

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar date carried by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarDate {
    /// Day of week, 0 = Sunday
    pub weekday: u8,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub day: u8,
}

impl Default for CalendarDate {
    fn default() -> Self {
        // 1 Jan 1970 was a Thursday
        Self {
            weekday: 4,
            month: 1,
            day: 1,
        }
    }
}

impl CalendarDate {
    /// Three-letter weekday name ("???" when out of range)
    pub fn weekday_abbrev(&self) -> &'static str {
        WEEKDAYS.get(self.weekday as usize).copied().unwrap_or("???")
    }

    /// Three-letter month name ("???" when out of range)
    pub fn month_abbrev(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTHS.get(i))
            .copied()
            .unwrap_or("???")
    }
}

/// A minute boundary on the local wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTick {
    /// Hour 0-23
    pub hour: u8,
    /// Minute 0-59
    pub minute: u8,
    pub date: CalendarDate,
}

impl ClockTick {
    /// Tick at `hour:minute` on the default date
    pub fn at(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            date: CalendarDate::default(),
        }
    }

    pub fn with_date(mut self, date: CalendarDate) -> Self {
        self.date = date;
        self
    }

    /// Hour on a 12-hour dial (1-12)
    pub fn hour_12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// The tick one minute later, wrapping at midnight
    ///
    /// The date is carried over unchanged.
    pub fn next_minute(&self) -> Self {
        let total = (self.hour as u16 * 60 + self.minute as u16 + 1) % (24 * 60);
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
            date: self.date,
        }
    }
}
