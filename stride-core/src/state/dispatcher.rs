//! Single-threaded event dispatch
//!
//! Handlers are registered once at startup and receive every event in
//! registration order. A handler reacting to an event may emit follow-up
//! events; these join the back of the queue once the current event has
//! reached every handler.

use heapless::{Deque, Vec};

use super::events::Event;

/// Follow-up events a single delivery may produce
pub const MAX_FOLLOW_UPS: usize = 4;

/// Errors reported by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Event queue is full; the event was dropped
    QueueFull,
    /// Handler table is full
    TooManyHandlers,
}

/// Reacts to delivered events
pub trait EventHandler {
    fn handle(&mut self, event: &Event, emitter: &mut Emitter);
}

/// Collects follow-up events during one delivery
#[derive(Debug, Default)]
pub struct Emitter {
    events: Vec<Event, MAX_FOLLOW_UPS>,
    overflowed: u32,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            overflowed: 0,
        }
    }

    /// Queue a follow-up event
    ///
    /// Returns false (and counts the loss) when this delivery has already
    /// produced [`MAX_FOLLOW_UPS`] events.
    pub fn emit(&mut self, event: Event) -> bool {
        match self.events.push(event) {
            Ok(()) => true,
            Err(_) => {
                self.overflowed = self.overflowed.saturating_add(1);
                false
            }
        }
    }

    /// Events emitted so far
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events lost because the emitter was full
    pub fn overflowed(&self) -> u32 {
        self.overflowed
    }
}

/// Event dispatcher with `H` handler slots and a queue of `Q` events
pub struct Dispatcher<'a, const H: usize, const Q: usize> {
    handlers: Vec<&'a mut dyn EventHandler, H>,
    queue: Deque<Event, Q>,
    dropped: u32,
}

impl<'a, const H: usize, const Q: usize> Default for Dispatcher<'a, H, Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const H: usize, const Q: usize> Dispatcher<'a, H, Q> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Add a handler; it receives events after those registered before it
    pub fn register(&mut self, handler: &'a mut dyn EventHandler) -> Result<(), DispatchError> {
        self.handlers
            .push(handler)
            .map_err(|_| DispatchError::TooManyHandlers)
    }

    /// Enqueue an event for a later [`dispatch_pending`](Self::dispatch_pending)
    ///
    /// A full queue drops the event and counts it in [`dropped`](Self::dropped).
    pub fn post(&mut self, event: Event) -> Result<(), DispatchError> {
        match self.queue.push_back(event) {
            Ok(()) => Ok(()),
            Err(_event) => {
                self.dropped = self.dropped.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("event queue full, dropping {}", _event);
                Err(DispatchError::QueueFull)
            }
        }
    }

    /// Deliver `event` now, then drain the queue
    ///
    /// Returns the number of events delivered, follow-ups included.
    pub fn dispatch(&mut self, event: Event) -> usize {
        self.deliver(&event);
        1 + self.dispatch_pending()
    }

    /// Deliver queued events in arrival order until the queue is empty
    ///
    /// Returns the number of events delivered.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            self.deliver(&event);
            delivered += 1;
        }
        delivered
    }

    /// Events waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Events lost to a full queue or a full emitter
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn deliver(&mut self, event: &Event) {
        let mut emitter = Emitter::new();
        for handler in self.handlers.iter_mut() {
            handler.handle(event, &mut emitter);
        }

        self.dropped = self.dropped.saturating_add(emitter.overflowed);
        for follow_up in emitter.events {
            // Loss is already counted by post()
            let _ = self.post(follow_up);
        }
    }
}
