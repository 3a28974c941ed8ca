use std::future::IntoFuture;
use std::sync::{Arc, Once, Weak};

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, trace};

use crate::event::{Codec, Event, JsonCodec};
use crate::exchange::{EndpointPtr, ExchangePtr};
use crate::transport::client::ClientTransport;
use crate::transport::endpoint::EndpointAdapter;
use crate::utils::{Error, Result};

/// In-process pubsub transport.
///
/// Lives in the same process as the exchange and exchanges events through
/// memory instead of a socket. It registers its endpoint face with the
/// exchange on construction and deregisters it on the first `close`, which
/// also happens when the last handle is dropped.
///
/// Built through [`TransportConfig`](crate::transport::TransportConfig).
pub struct Transport<C: Codec = JsonCodec> {
    identity: String,
    capacity: usize,
    codec: C,
    exchange: ExchangePtr,
    endpoint: EndpointPtr,
    events: Arc<Mutex<mpsc::Receiver<Arc<Event>>>>,
    close_once: Once,
    close_tx: watch::Sender<bool>,
}

impl<C: Codec> Transport<C> {
    pub(crate) fn new(
        identity: String,
        capacity: usize,
        exchange: ExchangePtr,
        codec: C,
    ) -> Arc<Self> {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let (close_tx, close_rx) = watch::channel(false);

        let transport = Arc::new_cyclic(|weak: &Weak<Self>| {
            let endpoint: EndpointPtr = Arc::new(EndpointAdapter::new(
                weak.clone(),
                identity.clone(),
                event_tx,
                close_rx,
            ));

            Self {
                identity,
                capacity,
                codec,
                exchange,
                endpoint,
                events: Arc::new(Mutex::new(event_rx)),
                close_once: Once::new(),
                close_tx,
            }
        });

        transport
            .exchange
            .register_endpoint(transport.endpoint.clone());
        debug!(identity = %transport.identity, capacity, "inproc transport registered");

        transport
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encodes `value` with the transport's codec and publishes it.
    ///
    /// Fails with [`Error::Serialization`] when the value cannot be encoded,
    /// in which case nothing reaches the exchange.
    pub async fn publish<T>(&self, topic: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let body = self.codec.encode(value)?;
        self.publish_body(topic, body).await
    }

    /// Read handle over the inbound queue.
    pub fn event_stream(&self) -> EventStream {
        EventStream {
            events: self.events.clone(),
            closed: self.close_tx.subscribe(),
        }
    }

    /// Handle on the close signal, usable without awaiting it.
    pub fn close_signal(&self) -> Closed {
        Closed {
            closed: self.close_tx.subscribe(),
        }
    }

    /// The endpoint face registered with the exchange, for broker-side
    /// runners that drive every endpoint the same way.
    pub fn as_endpoint(&self) -> EndpointPtr {
        self.endpoint.clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.close_tx.borrow()
    }
}

#[async_trait::async_trait]
impl<C: Codec> ClientTransport for Transport<C> {
    async fn publish_body(&self, topic: &str, body: Bytes) -> Result<()> {
        let event = Event::from_parts(
            Bytes::copy_from_slice(self.identity.as_bytes()),
            Bytes::copy_from_slice(topic.as_bytes()),
            body,
        );
        trace!(identity = %self.identity, topic, "publishing event");

        self.exchange.publish(Arc::new(event)).await
    }

    /// The exchange decides what reaches this endpoint.
    async fn subscribe(&self, topic_prefix: &str) -> Result<()> {
        trace!(identity = %self.identity, topic_prefix, "subscribe is a no-op");
        Ok(())
    }

    async fn unsubscribe(&self, topic_prefix: &str) -> Result<()> {
        trace!(identity = %self.identity, topic_prefix, "unsubscribe is a no-op");
        Ok(())
    }

    fn receive_channel(&self) -> BoxStream<'static, Arc<Event>> {
        self.event_stream().into_stream().boxed()
    }

    fn error_channel(&self) -> Option<mpsc::Receiver<Error>> {
        None
    }

    fn close(&self) -> Result<()> {
        // Concurrent callers block until the first one has finished.
        self.close_once.call_once(|| {
            self.exchange.unregister_endpoint(&self.endpoint);
            self.close_tx.send_replace(true);
            debug!(identity = %self.identity, "inproc transport closed");
        });

        Ok(())
    }

    fn closed(&self) -> BoxFuture<'static, ()> {
        self.close_signal().into_future()
    }

    async fn wait(&self) -> Result<()> {
        self.close_signal().await;
        Ok(())
    }
}

impl<C: Codec> Drop for Transport<C> {
    fn drop(&mut self) {
        let _ = <Self as ClientTransport>::close(self);
    }
}

impl<C: Codec> std::fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("identity", &self.identity)
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Read handle over a transport's inbound queue.
///
/// Handles are cheap to clone and share one queue; each event goes to
/// exactly one of them. The stream ends once the transport is closed, even
/// if events are still queued.
#[derive(Clone)]
pub struct EventStream {
    events: Arc<Mutex<mpsc::Receiver<Arc<Event>>>>,
    closed: watch::Receiver<bool>,
}

impl EventStream {
    /// Waits for the next event. Returns `None` once the transport is closed.
    pub async fn recv(&mut self) -> Option<Arc<Event>> {
        if self.is_closed() {
            return None;
        }

        let mut events = self.events.lock().await;
        tokio::select! {
            biased;

            _ = wait_closed(self.closed.clone()) => None,
            event = events.recv() => {
                if let Some(event) = &event {
                    trace!(topic = %String::from_utf8_lossy(event.topic()), "event dequeued");
                }
                event
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    pub fn into_stream(self) -> impl Stream<Item = Arc<Event>> + Send + 'static {
        futures::stream::unfold(self, |mut events| async move {
            let event = events.recv().await?;
            Some((event, events))
        })
    }
}

/// Fires once the transport has been closed.
///
/// Await it directly, call [`wait`](Self::wait) or poll [`is_closed`](Self::is_closed).
#[derive(Clone)]
pub struct Closed {
    closed: watch::Receiver<bool>,
}

impl Closed {
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    pub async fn wait(self) {
        wait_closed(self.closed).await
    }
}

impl IntoFuture for Closed {
    type Output = ();
    type IntoFuture = BoxFuture<'static, ()>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

/// Resolves when the close flag flips. A dropped sender counts as closed.
pub(crate) async fn wait_closed(mut closed: watch::Receiver<bool>) {
    let _ = closed.wait_for(|closed| *closed).await;
}
