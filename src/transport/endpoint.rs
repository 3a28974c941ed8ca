use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, watch};
use tracing::trace;

use crate::event::{Codec, Event};
use crate::exchange::Endpoint;
use crate::transport::ClientTransport;
use crate::transport::inproc::{Transport, wait_closed};
use crate::utils::{Error, Result};

const ENDPOINT_NAME: &str = "inproc endpoint";

/// Makes a [`Transport`] look like an exchange [`Endpoint`].
///
/// Holds its own handles to the inbound queue and the close signal, so a
/// delivery stuck on a full queue never keeps the transport alive. The weak
/// back-reference is only used to forward `close`.
pub struct EndpointAdapter<C: Codec> {
    transport: Weak<Transport<C>>,
    identity: String,
    events: mpsc::Sender<Arc<Event>>,
    closed: watch::Receiver<bool>,
}

impl<C: Codec> EndpointAdapter<C> {
    pub(crate) fn new(
        transport: Weak<Transport<C>>,
        identity: String,
        events: mpsc::Sender<Arc<Event>>,
        closed: watch::Receiver<bool>,
    ) -> Self {
        Self {
            transport,
            identity,
            events,
            closed,
        }
    }

    fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

#[async_trait::async_trait]
impl<C: Codec> Endpoint for EndpointAdapter<C> {
    /// Enqueues `event` for the local client.
    ///
    /// Suspends while the queue is full. Fails with `Terminated` if the
    /// transport is closed before or while waiting.
    async fn publish(&self, event: Arc<Event>) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Terminated(ENDPOINT_NAME.to_string()));
        }

        tokio::select! {
            biased;

            _ = wait_closed(self.closed.clone()) => {
                trace!(identity = %self.identity, "delivery aborted, transport closed");
                Err(Error::Terminated(ENDPOINT_NAME.to_string()))
            }

            sent = self.events.send(event) => {
                // The receiver only goes away together with the transport.
                sent.map_err(|_| Error::Terminated(ENDPOINT_NAME.to_string()))?;
                trace!(identity = %self.identity, "event enqueued");
                Ok(())
            }
        }
    }

    async fn serve(&self) -> Result<()> {
        wait_closed(self.closed.clone()).await;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        match self.transport.upgrade() {
            Some(transport) => transport.close(),
            // Dropping the transport already closed it.
            None => Ok(()),
        }
    }
}
