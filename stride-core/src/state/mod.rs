//! Event flow
//!
//! Everything the watch reacts to arrives as an [`Event`] and is delivered
//! to the registered handlers by a single-threaded [`Dispatcher`].

pub mod clock;
pub mod dispatcher;
pub mod events;

pub use clock::{CalendarDate, ClockTick};
pub use dispatcher::{DispatchError, Dispatcher, Emitter, EventHandler, MAX_FOLLOW_UPS};
pub use events::Event;
