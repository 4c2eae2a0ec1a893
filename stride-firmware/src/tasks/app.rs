//! Application task
//!
//! Owns every board-agnostic handler and runs the dispatcher: each event
//! from the other tasks is delivered to all handlers, then any follow-up
//! events they emitted are delivered in turn.

use defmt::*;

use stride_core::config::WatchConfig;
use stride_core::pedometer::Pedometer;
use stride_core::schedule::RefreshScheduler;
use stride_core::state::{Dispatcher, Event, EventHandler};
use stride_display::Watchface;

use crate::channels::EVENT_CHANNEL;
use crate::handlers::{ChannelWeatherLink, DisconnectAlert, ScreenPublisher};
use crate::store::CachedStore;

/// Number of registered handlers
const HANDLER_COUNT: usize = 4;

/// Follow-up event queue depth
const QUEUE_DEPTH: usize = 8;

/// App task - dispatches events to the watch handlers
#[embassy_executor::task]
pub async fn app_task(config: WatchConfig, steps: i32) {
    info!("App task started");

    let mut pedometer = Pedometer::new(&config, CachedStore::new(steps));
    let mut scheduler = RefreshScheduler::new(&config.schedule, ChannelWeatherLink);
    let mut alert = DisconnectAlert::default();
    let mut face = ScreenPublisher::new(Watchface::new(config.display));

    let mut dispatcher: Dispatcher<'_, HANDLER_COUNT, QUEUE_DEPTH> = Dispatcher::new();
    for handler in [
        &mut pedometer as &mut dyn EventHandler,
        &mut scheduler,
        &mut alert,
        &mut face,
    ] {
        if let Err(e) = dispatcher.register(handler) {
            error!("Failed to register handler: {:?}", e);
        }
    }

    dispatcher.dispatch(Event::Started);

    loop {
        let event = EVENT_CHANNEL.receive().await;
        if !event.is_sensor_event() {
            debug!("Event: {:?}", event);
        }
        let delivered = dispatcher.dispatch(event);
        trace!("Dispatched {} events", delivered);
    }
}
