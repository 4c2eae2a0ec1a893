//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicI32};

use stride_core::state::Event;
use stride_display::Screen;
use stride_protocol::{ClockSync, WatchMessage};

/// Channel capacity for events headed to the app task
const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for messages to the phone
const OUTBOX_SIZE: usize = 4;

/// Channel capacity for step count save requests
const SAVE_CHANNEL_SIZE: usize = 4;

/// Sensor, clock and link events for the app task
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Messages waiting to be sent to the phone
pub static OUTBOX: Channel<CriticalSectionRawMutex, WatchMessage, OUTBOX_SIZE> = Channel::new();

/// Wall clock received from the phone
pub static CLOCK_SYNC: Signal<CriticalSectionRawMutex, ClockSync> = Signal::new();

/// Latest rendered screen, picked up by the display task
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, Screen> = Signal::new();

/// Vibration pattern to play (durations in ms, alternating on/off)
pub static VIBE_CMD: Signal<CriticalSectionRawMutex, &'static [u32]> = Signal::new();

/// Step count save requests for the persist task
pub static SAVE_CHANNEL: Channel<CriticalSectionRawMutex, SaveRequest, SAVE_CHANNEL_SIZE> =
    Channel::new();

/// Set while the vibration motor is running
///
/// Read by the accelerometer task to tag samples taken during vibration.
pub static VIBRATING: AtomicBool = AtomicBool::new(false);

/// Set while the phone link is up
pub static CONNECTED: AtomicBool = AtomicBool::new(false);

/// Most recent step count, written to flash by the persist task
pub static STEP_COUNT: AtomicI32 = AtomicI32::new(0);

/// Request to write the step count to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveRequest {
    /// Save after the debounce window, merging later requests
    Schedule,
    /// Save now
    Immediate,
}
