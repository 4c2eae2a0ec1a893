//! Battery monitoring task
//!
//! Samples VSYS through the on-board divider and reports the charge level
//! when it moves by more than the gauge's hysteresis.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use stride_core::state::Event;
use stride_drivers::power::{adc_to_millivolts, BatteryGauge};

use crate::channels::EVENT_CHANNEL;

/// Time between battery readings
const SAMPLE_INTERVAL_SECS: u64 = 60;

/// Battery task - reads VSYS and posts battery level changes
#[embassy_executor::task]
pub async fn battery_task(mut adc: Adc<'static, Async>, mut vsys: Channel<'static>) {
    info!("Battery task started");

    let mut gauge = BatteryGauge::new();
    let mut ticker = Ticker::every(Duration::from_secs(SAMPLE_INTERVAL_SECS));

    loop {
        match adc.read(&mut vsys).await {
            Ok(raw) => {
                let mv = adc_to_millivolts(raw);
                trace!("VSYS {} mV", mv);
                if let Some(percent) = gauge.update(mv) {
                    debug!("Battery at {}%", percent);
                    if EVENT_CHANNEL.try_send(Event::Battery(percent)).is_err() {
                        warn!("Event channel full, dropping battery level");
                    }
                }
            }
            Err(e) => warn!("ADC read error: {:?}", e),
        }

        ticker.next().await;
    }
}
