//! The `event` module defines the unit of data moved between publishers,
//! the exchange and subscribed endpoints.
//!
//! An [`Event`] is immutable once built, apart from its sequence number which
//! the exchange assigns exactly once when it admits the event. Payloads are
//! encoded by a pluggable [`Codec`]; [`JsonCodec`] is the default and
//! [`MsgPackCodec`] produces MessagePack bodies.

pub mod codec;
#[allow(clippy::module_inception)]
pub mod event;

pub use codec::{Codec, JsonCodec, MsgPackCodec};
pub use event::{Event, EventSeqNum};

#[cfg(test)]
mod tests;
