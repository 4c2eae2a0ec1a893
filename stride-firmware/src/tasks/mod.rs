//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod accel;
pub mod app;
pub mod battery;
pub mod connection;
pub mod display;
pub mod link_rx;
pub mod link_tx;
pub mod persist;
pub mod tick;
pub mod vibe;

pub use accel::accel_task;
pub use app::app_task;
pub use battery::battery_task;
pub use connection::connection_task;
pub use display::display_task;
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use persist::persist_task;
pub use tick::tick_task;
pub use vibe::vibe_task;
