//! Broker-side interfaces the bridge plugs into.
//!
//! The exchange routes events between endpoints. Every transport, networked
//! or in-process, connects to it through an [`Endpoint`], so the broker can
//! treat them uniformly. Topic matching, fan-out and sequence assignment all
//! live behind [`Exchange`]; this crate only consumes the trait.

use std::sync::Arc;

use crate::event::Event;
use crate::utils::Result;

/// Shared handle to an exchange.
pub type ExchangePtr = Arc<dyn Exchange>;

/// Shared handle to an endpoint registered with an exchange.
pub type EndpointPtr = Arc<dyn Endpoint>;

/// Routes events from publishing clients to subscribed endpoints.
///
/// Endpoints are identified by handle identity (`Arc::ptr_eq`), not by value.
#[async_trait::async_trait]
pub trait Exchange: Send + Sync {
    fn register_endpoint(&self, endpoint: EndpointPtr);

    fn unregister_endpoint(&self, endpoint: &EndpointPtr);

    /// Ingest an event published by a client.
    ///
    /// The exchange assigns the sequence number and may deliver the event to
    /// any registered endpoint, including the publisher's own, before
    /// returning.
    async fn publish(&self, event: Arc<Event>) -> Result<()>;
}

/// The shape every transport exposes to the exchange.
#[async_trait::async_trait]
pub trait Endpoint: Send + Sync {
    /// Deliver an event to the client behind this endpoint.
    ///
    /// May suspend to apply backpressure to the exchange.
    async fn publish(&self, event: Arc<Event>) -> Result<()>;

    /// Run until the endpoint is closed.
    async fn serve(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;
}
