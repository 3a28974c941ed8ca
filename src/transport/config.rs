use std::sync::Arc;

use config::{Config, Environment};
use serde::Deserialize;

use crate::event::{Codec, JsonCodec};
use crate::exchange::ExchangePtr;
use crate::transport::inproc::Transport;
use crate::utils::{Error, Result};

/// Factory for [`Transport`].
///
/// Set the fields to the requested values, then build transports with
/// [`new_transport`](Self::new_transport).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Capacity of each transport's inbound event queue.
    pub channel_capacity: usize,
}

impl TransportConfig {
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the config from environment variables named `<prefix>_<FIELD>`,
    /// e.g. `MEEKO_INPROC_CHANNEL_CAPACITY`. Unset fields keep their defaults.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    /// Creates a transport for `identity` that encodes payloads as JSON and
    /// registers it with `exchange`.
    pub fn new_transport(
        &self,
        identity: impl Into<String>,
        exchange: ExchangePtr,
    ) -> Result<Arc<Transport>> {
        self.new_transport_with_codec(identity, exchange, JsonCodec)
    }

    /// Same as [`new_transport`](Self::new_transport) with a custom codec.
    pub fn new_transport_with_codec<C: Codec>(
        &self,
        identity: impl Into<String>,
        exchange: ExchangePtr,
        codec: C,
    ) -> Result<Arc<Transport<C>>> {
        if self.channel_capacity == 0 {
            return Err(Error::InvalidConfig(
                "channel_capacity must be at least 1".to_string(),
            ));
        }

        Ok(Transport::new(
            identity.into(),
            self.channel_capacity,
            exchange,
            codec,
        ))
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            channel_capacity: Self::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
