//! Message encoding and decoding
//!
//! Outgoing messages are serialized with postcard and COBS-framed in one
//! step. Incoming bytes are fed to a [`MessageDecoder`], which accumulates
//! them until a `0x00` delimiter completes a frame.

use core::marker::PhantomData;

use postcard::accumulator::{CobsAccumulator, FeedResult};
use serde::{Deserialize, Serialize};

/// Maximum size of a single framed message in bytes
pub const MAX_MESSAGE_SIZE: usize = 256;

/// Errors that can occur while encoding or decoding messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Message does not fit the output buffer
    Encode,
    /// Frame was complete but did not deserialize
    Decode,
    /// Frame exceeded [`MAX_MESSAGE_SIZE`] before its delimiter arrived
    Overflow,
}

/// Encode a message into `buf`, returning the framed bytes
///
/// The returned slice includes the trailing `0x00` delimiter.
pub fn encode<'a, M: Serialize>(message: &M, buf: &'a mut [u8]) -> Result<&'a mut [u8], ProtocolError> {
    postcard::to_slice_cobs(message, buf).map_err(|_| ProtocolError::Encode)
}

/// Streaming decoder for COBS-framed messages
///
/// Bytes may arrive in arbitrary chunks; a message is produced as soon as
/// its delimiter is seen. Garbage between frames yields a decode error and
/// the decoder resynchronises on the next delimiter.
pub struct MessageDecoder<M> {
    acc: CobsAccumulator<MAX_MESSAGE_SIZE>,
    _message: PhantomData<M>,
}

impl<M> Default for MessageDecoder<M>
where
    M: for<'de> Deserialize<'de>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M> MessageDecoder<M>
where
    M: for<'de> Deserialize<'de>,
{
    /// Create a new decoder
    pub fn new() -> Self {
        Self {
            acc: CobsAccumulator::new(),
            _message: PhantomData,
        }
    }

    /// Feed a chunk of received bytes
    ///
    /// Returns the outcome of the first frame completed within `bytes`
    /// (`None` when more bytes are needed) and the bytes not yet consumed.
    /// Call again with the remainder until it is empty.
    pub fn feed<'a>(&mut self, bytes: &'a [u8]) -> (Option<Result<M, ProtocolError>>, &'a [u8]) {
        match self.acc.feed::<M>(bytes) {
            FeedResult::Consumed => (None, &[]),
            FeedResult::OverFull(rest) => (Some(Err(ProtocolError::Overflow)), rest),
            FeedResult::DeserError(rest) => (Some(Err(ProtocolError::Decode)), rest),
            FeedResult::Success { data, remaining } => (Some(Ok(data)), remaining),
        }
    }
}
