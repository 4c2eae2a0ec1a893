//! Debounced step count save task
//!
//! Every credited step asks for a save. Requests are merged over a short
//! window so flash sees at most one write per window while walking; a
//! reset is written without waiting.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::Ordering;

use stride_hal_rp2040::flash::{Rp2040FlashStorage, StorageKey};
use stride_hal_rp2040::FlashStorageTrait;

use crate::channels::{SaveRequest, SAVE_CHANNEL, STEP_COUNT};

/// Window over which scheduled saves are merged
pub const SAVE_DEBOUNCE_MS: u64 = 5000;

/// Persist task - writes the latest step count to flash
#[embassy_executor::task]
pub async fn persist_task(mut storage: Rp2040FlashStorage<'static>, saved: i32) {
    info!("Persist task started");

    let mut last_saved = saved;

    loop {
        if SAVE_CHANNEL.receive().await == SaveRequest::Schedule {
            // The window is measured from the first request; later ones
            // ride along instead of pushing the deadline out
            let deadline = Instant::now() + Duration::from_millis(SAVE_DEBOUNCE_MS);
            loop {
                match select(Timer::at(deadline), SAVE_CHANNEL.receive()).await {
                    Either::First(()) => break,
                    Either::Second(SaveRequest::Immediate) => break,
                    Either::Second(SaveRequest::Schedule) => {}
                }
            }
        }

        let steps = STEP_COUNT.load(Ordering::Relaxed);
        if steps == last_saved {
            trace!("Step count unchanged, skipping save");
            continue;
        }

        match storage.write(StorageKey::StepCount, &steps.to_le_bytes()).await {
            Ok(()) => {
                debug!("Saved step count {}", steps);
                last_saved = steps;
            }
            Err(e) => error!("Failed to save step count: {:?}", e),
        }
    }
}
