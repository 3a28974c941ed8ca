use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::Result;

/// Encodes application values into event bodies and back.
///
/// The bridge never looks inside a body; the codec only has to agree with
/// whatever the subscribers use to decode it.
pub trait Codec: Send + Sync + 'static {
    fn encode<T>(&self, value: &T) -> Result<Bytes>
    where
        T: Serialize + ?Sized;

    fn decode<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}

/// Codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T>(&self, value: &T) -> Result<Bytes>
    where
        T: Serialize + ?Sized,
    {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }

    fn decode<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Codec backed by `rmp-serde`, writing structs as MessagePack maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl Codec for MsgPackCodec {
    fn encode<T>(&self, value: &T) -> Result<Bytes>
    where
        T: Serialize + ?Sized,
    {
        Ok(Bytes::from(rmp_serde::to_vec_named(value)?))
    }

    fn decode<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(rmp_serde::from_slice(body)?)
    }
}
