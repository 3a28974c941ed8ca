use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::event::{Codec, Event};
use crate::utils::{Error, Result};

/// Shared handle to any client transport.
pub type ClientTransportPtr = Arc<dyn ClientTransport>;

/// Client-side view of a pubsub transport.
///
/// This is what a pubsub service layer drives, whichever way the transport
/// reaches the broker. Bodies cross this interface already encoded; use
/// [`ClientTransportExt::publish_with`] to encode a value first.
#[async_trait::async_trait]
pub trait ClientTransport: Send + Sync {
    /// Hand an encoded body to the broker under `topic`.
    async fn publish_body(&self, topic: &str, body: Bytes) -> Result<()>;

    async fn subscribe(&self, topic_prefix: &str) -> Result<()>;

    async fn unsubscribe(&self, topic_prefix: &str) -> Result<()>;

    /// Inbound events. The stream ends when the transport closes.
    fn receive_channel(&self) -> BoxStream<'static, Arc<Event>>;

    /// Asynchronous transport errors, if the transport has any to report.
    fn error_channel(&self) -> Option<mpsc::Receiver<Error>>;

    fn close(&self) -> Result<()>;

    /// Resolves once `close` has completed.
    fn closed(&self) -> BoxFuture<'static, ()>;

    /// Suspend until the transport is closed.
    async fn wait(&self) -> Result<()>;
}

/// Encoding helpers available on every [`ClientTransport`].
#[async_trait::async_trait]
pub trait ClientTransportExt: ClientTransport {
    /// Encode `value` with `codec` and publish it under `topic`.
    async fn publish_with<C, T>(&self, codec: &C, topic: &str, value: &T) -> Result<()>
    where
        C: Codec,
        T: Serialize + Sync + ?Sized,
    {
        let body = codec.encode(value)?;
        self.publish_body(topic, body).await
    }
}

impl<X: ClientTransport + ?Sized> ClientTransportExt for X {}
