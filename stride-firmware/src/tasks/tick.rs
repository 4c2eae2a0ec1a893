//! Wall clock task
//!
//! Keeps the software clock running from the monotonic timer and emits a
//! [`Event::MinuteTick`] whenever the displayed minute changes.
//! A clock sync from the phone resets the clock and produces a tick at
//! once.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};

use stride_core::state::Event;

use crate::channels::{CLOCK_SYNC, EVENT_CHANNEL};
use crate::clock::WallClock;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Tick task - advances the wall clock and posts minute ticks
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started, waiting for clock sync");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut clock: Option<WallClock> = None;
    let mut last_update = Instant::now();
    let mut last_minute: Option<(u8, u8)> = None;

    loop {
        match select(CLOCK_SYNC.wait(), ticker.next()).await {
            Either::First(sync) => {
                info!(
                    "Clock set to {:02}:{:02}:{:02}",
                    sync.hour, sync.minute, sync.second
                );
                clock = Some(WallClock::from_sync(&sync));
                last_update = Instant::now();
            }
            Either::Second(()) => {
                if let Some(clock) = clock.as_mut() {
                    let elapsed = last_update.elapsed().as_secs();
                    clock.advance(elapsed);
                    last_update += Duration::from_secs(elapsed);
                }
            }
        }

        let Some(now) = clock else {
            continue;
        };
        let minute = (now.hour(), now.minute());
        if last_minute != Some(minute) {
            last_minute = Some(minute);
            trace!("Minute tick {:02}:{:02}", minute.0, minute.1);
            // Ticks drive the daily reset, so wait for room instead of dropping
            EVENT_CHANNEL.send(Event::MinuteTick(now.tick())).await;
        }
    }
}
