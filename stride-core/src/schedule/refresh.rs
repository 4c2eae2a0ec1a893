//! Weather refresh scheduling
//!
//! Requests are aligned to the wall clock rather than to a timer. The
//! first tick seen after startup picks an anchor minute just behind the
//! current one; from then on a request fires whenever the minute matches
//! the anchor modulo the refresh interval. With the default 30 minute
//! interval that is twice an hour, and the anchor choice puts the first
//! request at most one interval after startup.

use crate::config::ScheduleConfig;
use crate::state::{ClockTick, Emitter, Event, EventHandler};
use crate::traits::WeatherLink;

/// Anchor bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleState {
    /// No tick seen yet
    #[default]
    Unanchored,
    /// Anchor fixed; never recomputed for the life of the scheduler
    Anchored { anchor_minute: u8 },
}

/// Anchor chosen for a first tick at `minute`: one minute earlier
pub const fn anchor_for(minute: u8) -> u8 {
    if minute == 0 {
        59
    } else {
        minute - 1
    }
}

/// Periodic weather requester
pub struct RefreshScheduler<L> {
    link: L,
    interval: u8,
    state: ScheduleState,
    requests: u32,
}

impl<L: WeatherLink> RefreshScheduler<L> {
    pub fn new(config: &ScheduleConfig, link: L) -> Self {
        Self {
            link,
            // Guard the modulo; validated configs never carry 0
            interval: config.refresh_interval_min.max(1),
            state: ScheduleState::Unanchored,
            requests: 0,
        }
    }

    /// Handle a minute tick
    ///
    /// Returns true when a weather request was issued on this tick. A
    /// failed send still counts as issued; there is no retry.
    pub fn on_tick(&mut self, tick: &ClockTick) -> bool {
        let anchor = match self.state {
            ScheduleState::Anchored { anchor_minute } => anchor_minute,
            ScheduleState::Unanchored => {
                let anchor_minute = anchor_for(tick.minute);
                self.state = ScheduleState::Anchored { anchor_minute };
                #[cfg(feature = "defmt")]
                defmt::debug!("weather refresh anchored at minute {}", anchor_minute);
                anchor_minute
            }
        };

        if tick.minute % self.interval != anchor % self.interval {
            return false;
        }

        self.requests = self.requests.saturating_add(1);
        if let Err(_e) = self.link.request_weather() {
            #[cfg(feature = "defmt")]
            defmt::warn!("weather request failed: {}", _e);
        }
        true
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Anchor minute, once the first tick has been seen
    pub fn anchor_minute(&self) -> Option<u8> {
        match self.state {
            ScheduleState::Anchored { anchor_minute } => Some(anchor_minute),
            ScheduleState::Unanchored => None,
        }
    }

    /// Requests issued so far
    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

impl<L: WeatherLink> EventHandler for RefreshScheduler<L> {
    fn handle(&mut self, event: &Event, _emitter: &mut Emitter) {
        if let Event::MinuteTick(tick) = event {
            self.on_tick(tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LinkError;

    #[derive(Default)]
    struct MockLink {
        sent: u32,
        fail: bool,
    }

    impl WeatherLink for MockLink {
        fn request_weather(&mut self) -> Result<(), LinkError> {
            self.sent += 1;
            if self.fail {
                Err(LinkError::Disconnected)
            } else {
                Ok(())
            }
        }
    }

    fn scheduler() -> RefreshScheduler<MockLink> {
        RefreshScheduler::new(&ScheduleConfig::default(), MockLink::default())
    }

    #[test]
    fn test_anchor_for() {
        assert_eq!(anchor_for(0), 59);
        assert_eq!(anchor_for(1), 0);
        assert_eq!(anchor_for(10), 9);
        assert_eq!(anchor_for(59), 58);
    }

    #[test]
    fn test_first_tick_anchors() {
        let mut s = scheduler();
        assert_eq!(s.state(), ScheduleState::Unanchored);
        assert!(!s.on_tick(&ClockTick::at(8, 10)));
        assert_eq!(s.state(), ScheduleState::Anchored { anchor_minute: 9 });
        assert_eq!(s.link().sent, 0);
    }

    #[test]
    fn test_fires_at_anchor_and_half_hour_later() {
        let mut s = scheduler();
        let mut tick = ClockTick::at(8, 10);
        let mut fired = heapless::Vec::<u8, 8>::new();
        for _ in 0..60 {
            if s.on_tick(&tick) {
                fired.push(tick.minute).unwrap();
            }
            tick = tick.next_minute();
        }
        assert_eq!(fired.as_slice(), &[39, 9]);
        assert_eq!(s.link().sent, 2);
        assert_eq!(s.requests(), 2);
    }

    #[test]
    fn test_anchor_zero_is_kept() {
        // First tick at :01 anchors at minute 0, which must stick
        let mut s = scheduler();
        s.on_tick(&ClockTick::at(12, 1));
        assert_eq!(s.anchor_minute(), Some(0));

        assert!(s.on_tick(&ClockTick::at(12, 30)));
        assert!(!s.on_tick(&ClockTick::at(12, 31)));
        assert!(s.on_tick(&ClockTick::at(13, 0)));
        assert_eq!(s.anchor_minute(), Some(0));
    }

    #[test]
    fn test_first_tick_on_the_hour() {
        let mut s = scheduler();
        // Anchor 59: the anchoring tick itself does not fire
        assert!(!s.on_tick(&ClockTick::at(0, 0)));
        assert_eq!(s.anchor_minute(), Some(59));
        assert!(s.on_tick(&ClockTick::at(0, 29)));
    }

    #[test]
    fn test_anchor_never_recomputed() {
        let mut s = scheduler();
        s.on_tick(&ClockTick::at(5, 20));
        s.on_tick(&ClockTick::at(17, 44));
        assert_eq!(s.anchor_minute(), Some(19));
    }

    #[test]
    fn test_link_error_ignored() {
        let link = MockLink {
            sent: 0,
            fail: true,
        };
        let mut s = RefreshScheduler::new(&ScheduleConfig::default(), link);
        s.on_tick(&ClockTick::at(9, 10));
        assert!(s.on_tick(&ClockTick::at(9, 39)));
        // No retry on the next tick
        assert!(!s.on_tick(&ClockTick::at(9, 40)));
        assert_eq!(s.link().sent, 1);
        assert_eq!(s.anchor_minute(), Some(9));
    }

    #[test]
    fn test_custom_interval() {
        let config = ScheduleConfig {
            refresh_interval_min: 15,
            ..ScheduleConfig::default()
        };
        let mut s = RefreshScheduler::new(&config, MockLink::default());
        s.on_tick(&ClockTick::at(3, 7));
        for (minute, expect) in [(21, true), (22, false), (36, true), (51, true), (6, true)] {
            assert_eq!(s.on_tick(&ClockTick::at(4, minute)), expect);
        }
    }

    #[test]
    fn test_handler_ignores_other_events() {
        let mut s = scheduler();
        let mut emitter = Emitter::new();
        s.handle(&Event::Battery(20), &mut emitter);
        s.handle(&Event::StepCount(3), &mut emitter);
        assert_eq!(s.state(), ScheduleState::Unanchored);

        s.handle(&Event::MinuteTick(ClockTick::at(1, 0)), &mut emitter);
        assert_eq!(s.anchor_minute(), Some(59));
        assert!(emitter.events().is_empty());
    }

    proptest::proptest! {
        #[test]
        fn prop_twice_per_hour(hour in 0u8..24, minute in 0u8..60) {
            let mut s = scheduler();
            let mut tick = ClockTick::at(hour, minute);
            let mut fired = 0;
            for _ in 0..60 {
                if s.on_tick(&tick) {
                    fired += 1;
                }
                tick = tick.next_minute();
            }
            proptest::prop_assert_eq!(fired, 2);
            proptest::prop_assert_eq!(s.link().sent, 2);
        }
    }
}
