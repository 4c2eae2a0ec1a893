//! Watchface layout
//!
//! The face is a fixed grid of eight rows:
//!
//! ```text
//! 0  Steps: 1234          80%
//! 1        Mon Oct 19    [BT]
//! 2           10:42
//! 3  72F Clear @ 10:30
//! 4  65F, light rain in 4 hrs
//! 5  clear sky 58F nxt morning
//! 6  few clouds 70F nxt evening
//! 7  Forecast for Paris
//! ```
//!
//! Weather rows keep a loading placeholder until the phone delivers the
//! data they need, and afterwards keep the last complete value.

use core::fmt::Write;

use heapless::String;
use stride_core::config::{DisplayConfig, TemperatureUnit};
use stride_core::state::{ClockTick, Emitter, Event, EventHandler};
use stride_protocol::{Reading, WeatherReport};

use crate::screen::{Align, Screen, LINE_CAPACITY};

/// Row assignments
pub mod rows {
    pub const STATUS: usize = 0;
    pub const DATE: usize = 1;
    pub const TIME: usize = 2;
    pub const CURRENT: usize = 3;
    pub const THREE_HOUR: usize = 4;
    pub const MORNING: usize = 5;
    pub const EVENING: usize = 6;
    pub const CITY: usize = 7;
}

const LOADING_CURRENT: &str = "Loading Weather ...";
const LOADING_THREE_HOUR: &str = "Loading 3-hr Forecast...";
const LOADING_MORNING: &str = "Loading morning forecast...";
const LOADING_EVENING: &str = "Loading evening forecast...";
const LOADING_CITY: &str = "Loading city...";

/// Shown in place of the bluetooth icon while the phone is away
const DISCONNECTED_MARK: &str = "[BT]";

type Line = String<LINE_CAPACITY>;

/// Helper to write formatted output to a heapless String
fn write_line(args: core::fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    // Overlong output is cut off here and clipped again by the screen
    let _ = line.write_fmt(args);
    line
}

/// Presentation handler for the main face
pub struct Watchface {
    screen: Screen,
    config: DisplayConfig,
    steps: u32,
    battery: Option<u8>,
    connected: bool,
    now: Option<ClockTick>,
}

impl Watchface {
    pub fn new(config: DisplayConfig) -> Self {
        let mut face = Self {
            screen: Screen::new(),
            config,
            steps: 0,
            battery: None,
            connected: true,
            now: None,
        };
        face.render_all();
        face
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Redraw every row from current state (weather rows reset to loading)
    pub fn render_all(&mut self) {
        self.screen.clear();
        self.render_status();
        self.render_clock();
        self.screen.set_line(rows::CURRENT, LOADING_CURRENT);
        self.screen.set_line(rows::THREE_HOUR, LOADING_THREE_HOUR);
        self.screen.set_line(rows::MORNING, LOADING_MORNING);
        self.screen.set_line(rows::EVENING, LOADING_EVENING);
        self.screen.set_line(rows::CITY, LOADING_CITY);
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
        self.render_status();
    }

    pub fn set_battery(&mut self, percent: u8) {
        self.battery = Some(percent.min(100));
        self.render_status();
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        self.render_clock();
    }

    pub fn set_time(&mut self, tick: ClockTick) {
        self.now = Some(tick);
        self.render_clock();
    }

    /// Update every weather row the report carries data for
    pub fn apply_weather(&mut self, report: &WeatherReport) {
        let unit = self.config.temperature_unit;

        if let Some(current) = &report.current {
            let at = self.time_text();
            let line = write_line(format_args!(
                "{}{} {} @ {}",
                current.temperature,
                unit.suffix(),
                current.conditions,
                at
            ));
            self.screen.set_line(rows::CURRENT, &line);
        }
        if let Some(later) = &report.three_hour {
            let line = write_line(format_args!(
                "{}{}, {} in 4 hrs",
                later.temperature,
                unit.suffix(),
                later.conditions
            ));
            self.screen.set_line(rows::THREE_HOUR, &line);
        }
        if let Some(morning) = &report.next_morning {
            let line = Self::next_day_line(morning, unit, "morning");
            self.screen.set_line(rows::MORNING, &line);
        }
        if let Some(evening) = &report.next_evening {
            let line = Self::next_day_line(evening, unit, "evening");
            self.screen.set_line(rows::EVENING, &line);
        }
        if let Some(city) = &report.city {
            let line = write_line(format_args!("Forecast for {}", city));
            self.screen.set_line(rows::CITY, &line);
        }
    }

    fn next_day_line(reading: &Reading, unit: TemperatureUnit, part: &str) -> Line {
        write_line(format_args!(
            "{} {}{} nxt {}",
            reading.conditions,
            reading.temperature,
            unit.suffix(),
            part
        ))
    }

    fn render_status(&mut self) {
        let left = write_line(format_args!("Steps: {}", self.steps));
        let right = match self.battery {
            Some(percent) => write_line(format_args!("{}%", percent)),
            None => Line::new(),
        };
        self.screen.set_split(rows::STATUS, &left, &right);
    }

    fn render_clock(&mut self) {
        let mark = if self.connected { "" } else { DISCONNECTED_MARK };
        match self.now {
            Some(tick) => {
                let date = write_line(format_args!(
                    "{} {} {:02}",
                    tick.date.weekday_abbrev(),
                    tick.date.month_abbrev(),
                    tick.date.day
                ));
                self.screen.set_aligned(rows::DATE, &date, Align::Center);
                let time = self.time_text();
                self.screen.set_aligned(rows::TIME, &time, Align::Center);
            }
            None => {
                self.screen.set_line(rows::DATE, "");
                self.screen.set_aligned(rows::TIME, "--:--", Align::Center);
            }
        }

        if !mark.is_empty() {
            // Overlay the mark on the right edge of the date row
            let mut date = Line::new();
            let _ = date.push_str(self.screen.get_line(rows::DATE).unwrap_or("").trim_end());
            self.screen.set_split(rows::DATE, &date, mark);
        }
    }

    fn time_text(&self) -> Line {
        match self.now {
            Some(tick) if self.config.clock_24h => {
                write_line(format_args!("{:02}:{:02}", tick.hour, tick.minute))
            }
            Some(tick) => write_line(format_args!("{:02}:{:02}", tick.hour_12(), tick.minute)),
            None => write_line(format_args!("--:--")),
        }
    }
}

impl EventHandler for Watchface {
    fn handle(&mut self, event: &Event, _emitter: &mut Emitter) {
        match event {
            Event::Started => self.render_all(),
            Event::StepCount(steps) => self.set_steps(*steps),
            Event::Battery(percent) => self.set_battery(*percent),
            Event::Connection(connected) => self.set_connected(*connected),
            Event::MinuteTick(tick) => self.set_time(*tick),
            Event::Weather(report) => self.apply_weather(report),
            Event::AccelBatch(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::state::CalendarDate;
    use stride_protocol::messages::text;

    fn face() -> Watchface {
        Watchface::new(DisplayConfig::default())
    }

    fn line(face: &Watchface, row: usize) -> &str {
        face.screen().get_line(row).unwrap()
    }

    fn tick(hour: u8, minute: u8) -> ClockTick {
        ClockTick::at(hour, minute).with_date(CalendarDate {
            weekday: 1,
            month: 10,
            day: 19,
        })
    }

    #[test]
    fn test_initial_placeholders() {
        let face = face();
        assert!(line(&face, rows::STATUS).starts_with("Steps: 0"));
        assert_eq!(line(&face, rows::CURRENT), "Loading Weather ...");
        assert_eq!(line(&face, rows::THREE_HOUR), "Loading 3-hr Forecast...");
        // 27 characters, clipped to the row width
        assert_eq!(line(&face, rows::MORNING), "Loading morning forecast.");
        assert_eq!(line(&face, rows::CITY), "Loading city...");
        assert!(line(&face, rows::TIME).ends_with("--:--"));
    }

    #[test]
    fn test_status_row() {
        let mut face = face();
        face.set_steps(1234);
        face.set_battery(80);
        let status = line(&face, rows::STATUS);
        assert!(status.starts_with("Steps: 1234 "));
        assert!(status.ends_with(" 80%"));
    }

    #[test]
    fn test_clock_rows() {
        let mut face = face();
        face.set_time(tick(9, 5));
        assert_eq!(line(&face, rows::DATE).trim(), "Mon Oct 19");
        assert_eq!(line(&face, rows::TIME).trim(), "09:05");
    }

    #[test]
    fn test_twelve_hour_clock() {
        let mut face = Watchface::new(DisplayConfig {
            clock_24h: false,
            ..DisplayConfig::default()
        });
        face.set_time(tick(15, 42));
        assert_eq!(line(&face, rows::TIME).trim(), "03:42");
    }

    #[test]
    fn test_disconnect_mark() {
        let mut face = face();
        face.set_time(tick(9, 5));
        face.set_connected(false);
        let date = line(&face, rows::DATE);
        assert!(date.ends_with(" [BT]"));
        assert!(date.contains("Mon Oct 19"));

        face.set_connected(true);
        assert!(!line(&face, rows::DATE).contains("[BT]"));
    }

    #[test]
    fn test_weather_rows() {
        let mut face = face();
        face.set_time(tick(10, 30));
        face.apply_weather(&WeatherReport {
            current: Some(Reading::new(72, "Clear")),
            ..WeatherReport::default()
        });
        assert_eq!(line(&face, rows::CURRENT), "72F Clear @ 10:30");
        // Rows without data keep their placeholder
        assert_eq!(line(&face, rows::THREE_HOUR), "Loading 3-hr Forecast...");

        face.apply_weather(&WeatherReport {
            three_hour: Some(Reading::new(65, "light rain")),
            next_morning: Some(Reading::new(58, "clear sky")),
            next_evening: Some(Reading::new(70, "few clouds")),
            city: Some(text("Paris")),
            ..WeatherReport::default()
        });
        assert_eq!(line(&face, rows::CURRENT), "72F Clear @ 10:30");
        assert_eq!(line(&face, rows::THREE_HOUR), "65F, light rain in 4 hrs");
        assert_eq!(line(&face, rows::MORNING), "clear sky 58F nxt morning");
        assert_eq!(line(&face, rows::EVENING), "few clouds 70F nxt evenin");
        assert_eq!(line(&face, rows::CITY), "Forecast for Paris");
    }

    #[test]
    fn test_celsius_suffix() {
        let mut face = Watchface::new(DisplayConfig {
            temperature_unit: TemperatureUnit::Celsius,
            ..DisplayConfig::default()
        });
        face.apply_weather(&WeatherReport {
            three_hour: Some(Reading::new(-3, "snow")),
            ..WeatherReport::default()
        });
        assert_eq!(line(&face, rows::THREE_HOUR), "-3C, snow in 4 hrs");
    }

    #[test]
    fn test_handles_events() {
        let mut face = face();
        let mut emitter = Emitter::new();
        face.handle(&Event::StepCount(42), &mut emitter);
        face.handle(&Event::Battery(55), &mut emitter);
        face.handle(&Event::MinuteTick(tick(23, 59)), &mut emitter);
        face.handle(&Event::Connection(false), &mut emitter);

        assert!(line(&face, rows::STATUS).starts_with("Steps: 42"));
        assert!(line(&face, rows::STATUS).ends_with("55%"));
        assert_eq!(line(&face, rows::TIME).trim(), "23:59");
        assert!(line(&face, rows::DATE).ends_with("[BT]"));
        assert!(emitter.events().is_empty());
    }
}
