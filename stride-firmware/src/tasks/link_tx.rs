//! Phone link transmit task
//!
//! Frames outgoing messages and writes them to the Bluetooth UART bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use stride_protocol::{encode, WatchMessage};

use crate::channels::OUTBOX;

/// Frame buffer size; the watch only sends marker messages
const TX_BUF_SIZE: usize = 16;

/// Link TX task - sends queued messages to the phone
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; TX_BUF_SIZE];

    loop {
        let message = OUTBOX.receive().await;
        send_message(&mut tx, &message, &mut buf).await;
    }
}

async fn send_message(tx: &mut BufferedUartTx, message: &WatchMessage, buf: &mut [u8]) {
    let frame = match encode(message, buf) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode {:?}: {:?}", message, e);
            return;
        }
    };
    if let Err(e) = tx.write_all(frame).await {
        warn!("Failed to send {:?}: {:?}", message, e);
    } else {
        debug!("Sent {:?}", message);
    }
}
