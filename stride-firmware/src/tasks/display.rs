//! OLED display task
//!
//! Draws each screen published by the app task and pushes the framebuffer
//! to the SH1106. Intermediate screens are skipped if rendering falls
//! behind; only the latest one matters.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;

use stride_drivers::display::Sh1106;

use crate::channels::SCREEN_UPDATE;

/// Delay between init attempts when the panel does not answer
const INIT_RETRY_SECS: u64 = 5;

/// Display task - renders screens to the OLED
#[embassy_executor::task]
pub async fn display_task(i2c: I2c<'static, I2C1, Async>) {
    info!("Display task started");

    let mut panel = Sh1106::new(i2c);
    while let Err(e) = panel.init().await {
        error!("Display init failed: {:?}, retrying", e);
        Timer::after_secs(INIT_RETRY_SECS).await;
    }

    loop {
        let mut screen = SCREEN_UPDATE.wait().await;
        trace!("{:?}", screen);

        if let Err(e) = screen.render(&mut panel) {
            warn!("Failed to render screen: {:?}", e);
            continue;
        }
        if let Err(e) = panel.flush().await {
            warn!("Failed to flush display: {:?}", e);
        }
    }
}
