//! Accelerometer sampling task
//!
//! Polls the LIS3DH at the configured rate, tags each sample with the
//! vibration flag and the uptime in milliseconds, and posts full batches
//! to the app task.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker, Timer};
use portable_atomic::Ordering;

use stride_core::config::PedometerConfig;
use stride_core::pedometer::AccelSample;
use stride_core::state::Event;
use stride_drivers::accel::{BatchCollector, Lis3dh};

use crate::channels::{EVENT_CHANNEL, VIBRATING};

/// Delay between init attempts when the sensor does not answer
const INIT_RETRY_SECS: u64 = 5;

/// Accelerometer task - samples the forearm axis and batches readings
#[embassy_executor::task]
pub async fn accel_task(i2c: I2c<'static, I2C0, Async>, config: PedometerConfig) {
    info!("Accel task started");

    let mut accel = Lis3dh::new(i2c);
    while let Err(e) = accel.init(config.sample_rate).await {
        error!(
            "Accelerometer init failed: {:?}, retrying",
            Debug2Format(&e)
        );
        Timer::after_secs(INIT_RETRY_SECS).await;
    }
    info!(
        "Accelerometer running at {} Hz, {} samples per batch",
        config.sample_rate.hz(),
        config.samples_per_batch
    );

    let mut collector = BatchCollector::from_config(&config);
    let mut ticker = Ticker::every(Duration::from_millis(config.sample_rate.period_ms() as u64));

    loop {
        ticker.next().await;

        let magnitude = match accel.read_y_mg().await {
            Ok(mg) => mg,
            Err(e) => {
                warn!("Accelerometer read failed: {:?}", Debug2Format(&e.bus_kind()));
                continue;
            }
        };

        let sample = AccelSample::new(
            magnitude,
            VIBRATING.load(Ordering::Relaxed),
            Instant::now().as_millis() as i64,
        );

        if let Some(batch) = collector.push(sample) {
            if EVENT_CHANNEL.try_send(Event::AccelBatch(batch)).is_err() {
                warn!("Event channel full, dropping sensor batch");
            }
        }
    }
}
