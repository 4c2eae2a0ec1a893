//! Watch ↔ phone message protocol
//!
//! This crate defines the messages exchanged between the watch and the
//! companion app on the paired phone. The phone owns all networking: the
//! watch only ever asks for weather, and the phone answers with whatever
//! readings it managed to fetch.
//!
//! # Protocol Overview
//!
//! Messages are postcard-serialized and COBS-framed, so every message on
//! the wire ends with a single `0x00` delimiter:
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ COBS(postcard(message))      │ 0x00 │
//! └──────────────────────────────┴──────┘
//! ```
//!
//! The watch sends [`WatchMessage`]; the phone sends [`HostMessage`].

#![no_std]
#![deny(unsafe_code)]

pub mod codec;
pub mod messages;

pub use codec::{encode, MessageDecoder, ProtocolError, MAX_MESSAGE_SIZE};
pub use messages::{ClockSync, HostMessage, Reading, Text, WatchMessage, WeatherReport};
