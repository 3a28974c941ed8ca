//! # pubsub-inproc
//!
//! `pubsub-inproc` is an in-process transport for a publish/subscribe broker.
//! It lets a client living in the broker's process exchange events with the
//! broker's exchange through memory, while keeping the contract every network
//! transport honours: bounded queues with backpressure, FIFO delivery and a
//! one-shot, idempotent shutdown.
//!
//! ## Core Modules
//!
//! - `event`: The `Event` record, its sequence number and the payload codec.
//! - `exchange`: The broker-side `Exchange` and `Endpoint` interfaces.
//! - `transport`: The bridge transport, its endpoint adapter and factory.
//! - `config`: Loading application settings from files and the environment.
//! - `utils`: Error type and logging setup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pubsub_inproc::TransportConfig;
//!
//! let transport = TransportConfig::new().new_transport("agent-1", exchange)?;
//! let mut events = transport.event_stream();
//!
//! transport.publish("sensor.updates", &reading).await?;
//! while let Some(event) = events.recv().await {
//!     // ...
//! }
//! ```

pub mod config;
pub mod event;
pub mod exchange;
pub mod transport;
pub mod utils;

pub use event::{Codec, Event, EventSeqNum, JsonCodec, MsgPackCodec};
pub use exchange::{Endpoint, EndpointPtr, Exchange, ExchangePtr};
pub use transport::{
    ClientTransport, ClientTransportExt, ClientTransportPtr, Closed, EndpointAdapter, EventStream,
    Transport, TransportConfig,
};
pub use utils::{Error, Result};
