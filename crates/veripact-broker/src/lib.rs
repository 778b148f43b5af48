//! Pact-broker contract source for veripact.
//!
//! Owns the broker configuration surface (`url`, `username`, `password`,
//! `tags`) and the per-tag retrieval fan-out. The HTTP conversation with the
//! broker is supplied by the integrator through [`BrokerClient`]; this crate
//! never performs network I/O itself.

mod config;
mod source;

pub use config::{BrokerAuth, BrokerConfig};
pub use source::{BROKER_SOURCE_NAME, BrokerClient, BrokerSource};
