use std::sync::OnceLock;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::event::codec::Codec;
use crate::utils::Result;

/// Sequence number assigned to an event by the exchange.
pub type EventSeqNum = u64;

/// Represents a published event travelling through the exchange.
///
/// # Fields
///
/// - `topic` - routing key subscribers filter on.
/// - `publisher` - identity of the client that published the event.
/// - `seq` - big-endian encoded sequence number, set once by the exchange.
/// - `body` - payload encoded by the publisher's codec.
///
/// Events are shared as `Arc<Event>` between the exchange and every endpoint
/// queue they are delivered to, so the sequence slot uses interior mutability.
#[derive(Debug)]
pub struct Event {
    topic: Bytes,
    publisher: Bytes,
    seq: OnceLock<[u8; 8]>,
    body: Bytes,
}

impl Event {
    /// Builds an event by encoding `value` with `codec`.
    ///
    /// Fails with [`Error::Serialization`](crate::Error::Serialization) when
    /// the value cannot be represented by the codec.
    pub fn encode<C, T>(codec: &C, publisher: &str, topic: &str, value: &T) -> Result<Self>
    where
        C: Codec,
        T: Serialize + ?Sized,
    {
        let body = codec.encode(value)?;
        Ok(Self::from_parts(
            Bytes::copy_from_slice(publisher.as_bytes()),
            Bytes::copy_from_slice(topic.as_bytes()),
            body,
        ))
    }

    /// Builds an event from an already encoded body.
    pub fn from_parts(
        publisher: impl Into<Bytes>,
        topic: impl Into<Bytes>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            topic: topic.into(),
            publisher: publisher.into(),
            seq: OnceLock::new(),
            body: body.into(),
        }
    }

    pub fn publisher(&self) -> &[u8] {
        &self.publisher
    }

    pub fn topic(&self) -> &[u8] {
        &self.topic
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the big-endian encoded sequence number.
    ///
    /// # Panics
    ///
    /// Panics if the exchange has not assigned a sequence number yet.
    pub fn sequence(&self) -> &[u8] {
        match self.seq.get() {
            Some(seq) => seq,
            None => panic!("Event::sequence called before Event::assign_sequence"),
        }
    }

    /// Returns the sequence number decoded back into an integer.
    ///
    /// # Panics
    ///
    /// Panics if the exchange has not assigned a sequence number yet.
    pub fn sequence_number(&self) -> EventSeqNum {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.sequence());
        EventSeqNum::from_be_bytes(raw)
    }

    pub fn has_sequence(&self) -> bool {
        self.seq.get().is_some()
    }

    /// Stores `seq` as the event's sequence number.
    ///
    /// Only the first assignment takes effect.
    pub fn assign_sequence(&self, seq: EventSeqNum) {
        if self.seq.set(seq.to_be_bytes()).is_err() {
            tracing::warn!(
                topic = %String::from_utf8_lossy(&self.topic),
                seq,
                "sequence already assigned, keeping the first one"
            );
        }
    }

    /// Decodes the body with `codec`.
    pub fn decode<C, T>(&self, codec: &C) -> Result<T>
    where
        C: Codec,
        T: DeserializeOwned,
    {
        codec.decode(&self.body)
    }
}
