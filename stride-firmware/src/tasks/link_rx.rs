//! Phone link receive task
//!
//! Decodes COBS-framed messages from the Bluetooth UART bridge and
//! forwards weather and clock updates.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use stride_core::state::Event;
use stride_protocol::{HostMessage, MessageDecoder};

use crate::channels::{CLOCK_SYNC, EVENT_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and decodes messages from the phone
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut decoder = MessageDecoder::<HostMessage>::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                let mut window = &buf[..n];
                while !window.is_empty() {
                    let (result, rest) = decoder.feed(window);
                    match result {
                        Some(Ok(message)) => handle_host_message(message),
                        Some(Err(e)) => warn!("Dropped malformed frame: {:?}", e),
                        None => {}
                    }
                    window = rest;
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a decoded phone message
fn handle_host_message(message: HostMessage) {
    match message {
        HostMessage::Weather(report) => {
            if report.is_empty() {
                debug!("Empty weather report ignored");
                return;
            }
            debug!("Weather report received");
            if EVENT_CHANNEL.try_send(Event::Weather(report)).is_err() {
                warn!("Event channel full, dropping weather report");
            }
        }
        HostMessage::ClockSync(sync) => {
            if sync.is_valid() {
                CLOCK_SYNC.signal(sync);
            } else {
                warn!("Invalid clock sync: {:?}", sync);
            }
        }
    }
}
