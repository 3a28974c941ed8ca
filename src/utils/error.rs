//! The `error` module defines the error type returned by the bridge.
//!
//! Reading a sequence number before it was assigned is not represented here:
//! it is a caller bug and panics instead.

use thiserror::Error;

/// Boxed source error carried by codec failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while publishing or delivering events
#[derive(Error, Debug)]
pub enum Error {
    /// The event payload could not be encoded or decoded by the codec
    #[error("serialization error: {0}")]
    Serialization(#[source] BoxError),

    /// The endpoint or transport was closed before the operation completed
    #[error("{0} terminated")]
    Terminated(String),

    /// The exchange refused or failed to ingest an event
    #[error("exchange error: {0}")]
    Exchange(String),

    /// Transport configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(Box::new(err))
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Error::Serialization(Box::new(err))
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Error::Serialization(Box::new(err))
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;
