//! Phone connection task
//!
//! Watches the Bluetooth module's STATE pin, which is high while a phone
//! is connected, and posts a [`Event::Connection`] on every change.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;
use portable_atomic::Ordering;

use stride_core::state::Event;

use crate::channels::{CONNECTED, EVENT_CHANNEL};

/// Settle time after an edge before the level is trusted
const DEBOUNCE_MS: u64 = 50;

/// Connection task - reports link state changes
#[embassy_executor::task]
pub async fn connection_task(mut state_pin: Input<'static>) {
    info!("Connection task started");

    let mut connected = state_pin.is_high();
    CONNECTED.store(connected, Ordering::Relaxed);
    info!("Phone {}", if connected { "connected" } else { "disconnected" });
    EVENT_CHANNEL.send(Event::Connection(connected)).await;

    loop {
        state_pin.wait_for_any_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        let level = state_pin.is_high();
        if level == connected {
            continue;
        }
        connected = level;
        CONNECTED.store(connected, Ordering::Relaxed);
        info!("Phone {}", if connected { "connected" } else { "disconnected" });
        EVENT_CHANNEL.send(Event::Connection(connected)).await;
    }
}
