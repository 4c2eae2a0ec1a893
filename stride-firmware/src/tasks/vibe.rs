//! Vibration motor task
//!
//! Plays patterns requested through [`VIBE_CMD`] and keeps [`VIBRATING`]
//! up to date so the step detector can ignore the motor's own shaking.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;
use portable_atomic::Ordering;

use stride_drivers::haptics::VibeMotor;
use stride_hal_rp2040::gpio::Rp2040OutputPin;

use crate::channels::{VIBE_CMD, VIBRATING};

/// Vibe task - runs vibration patterns
#[embassy_executor::task]
pub async fn vibe_task(pin: Rp2040OutputPin<'static>) {
    info!("Vibe task started");

    let mut motor = VibeMotor::new(pin);

    loop {
        let mut pattern = VIBE_CMD.wait().await;
        'play: loop {
            debug!("Playing vibe pattern ({} segments)", pattern.len());
            motor.start(pattern);
            while let Some(ms) = motor.advance() {
                VIBRATING.store(motor.is_vibrating(), Ordering::Relaxed);
                // A new request replaces the pattern in progress
                if let Either::Second(next) =
                    select(Timer::after_millis(ms as u64), VIBE_CMD.wait()).await
                {
                    pattern = next;
                    continue 'play;
                }
            }
            break;
        }
        motor.stop();
        VIBRATING.store(false, Ordering::Relaxed);
    }
}
