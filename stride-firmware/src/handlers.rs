//! Firmware-side event handlers and link adapter
//!
//! These sit between the board-agnostic handlers and the task channels.

use portable_atomic::Ordering;

use stride_core::state::{Emitter, Event, EventHandler};
use stride_core::traits::{LinkError, WeatherLink};
use stride_display::Watchface;
use stride_drivers::haptics::DOUBLE_PULSE;
use stride_protocol::WatchMessage;

use crate::channels::{CONNECTED, OUTBOX, SCREEN_UPDATE, VIBE_CMD};

/// Weather link that queues requests for the link TX task
pub struct ChannelWeatherLink;

impl WeatherLink for ChannelWeatherLink {
    fn request_weather(&mut self) -> Result<(), LinkError> {
        if !CONNECTED.load(Ordering::Relaxed) {
            return Err(LinkError::Disconnected);
        }
        OUTBOX
            .try_send(WatchMessage::WeatherRequest)
            .map_err(|_| LinkError::Busy)
    }
}

/// Watchface that publishes its screen to the display task after each
/// event that changed it
pub struct ScreenPublisher {
    face: Watchface,
}

impl ScreenPublisher {
    pub fn new(face: Watchface) -> Self {
        Self { face }
    }
}

impl EventHandler for ScreenPublisher {
    fn handle(&mut self, event: &Event, emitter: &mut Emitter) {
        self.face.handle(event, emitter);

        let screen = self.face.screen_mut();
        if screen.is_dirty() {
            SCREEN_UPDATE.signal(screen.clone());
            screen.mark_clean();
        }
    }
}

/// Buzzes when a connected phone goes away
#[derive(Default)]
pub struct DisconnectAlert {
    connected: Option<bool>,
}

impl DisconnectAlert {
    /// Track a connection change; true if it should be announced
    pub fn on_connection(&mut self, connected: bool) -> bool {
        let was = self.connected.replace(connected);
        was == Some(true) && !connected
    }
}

impl EventHandler for DisconnectAlert {
    fn handle(&mut self, event: &Event, _emitter: &mut Emitter) {
        if let Event::Connection(connected) = event {
            if self.on_connection(*connected) {
                VIBE_CMD.signal(DOUBLE_PULSE);
            }
        }
    }
}
