//! The `utils` module provides a collection of utility functions and common
//! definitions used across the crate.
//!
//! This module centralizes the error type shared by every component and the
//! logging bootstrap used by applications embedding the bridge.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
