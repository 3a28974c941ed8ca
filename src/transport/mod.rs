//! The `transport` module implements the in-process bridge between a local
//! pubsub client and the broker's exchange.
//!
//! A [`Transport`] has two faces. Applications use it through
//! [`ClientTransport`]: publishing, receiving and closing. The exchange sees
//! it as an [`Endpoint`](crate::exchange::Endpoint) through the adapter
//! returned by [`Transport::as_endpoint`], and pushes events into a bounded
//! queue the application drains via [`EventStream`] or
//! [`ClientTransport::receive_channel`].
//!
//! ## Backpressure
//!
//! When the queue is full, the exchange's delivery to this endpoint suspends
//! until the application makes room or the transport closes. Nothing is
//! dropped silently.
//!
//! ## Shutdown
//!
//! `close` is idempotent and never suspends. The first call deregisters the
//! endpoint and fires the [`Closed`] signal; every pending delivery then fails
//! with [`Error::Terminated`](crate::Error::Terminated), receive streams end
//! and `wait`/`serve` return.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod inproc;

pub use client::{ClientTransport, ClientTransportExt, ClientTransportPtr};
pub use config::TransportConfig;
pub use endpoint::EndpointAdapter;
pub use inproc::{Closed, EventStream, Transport};
