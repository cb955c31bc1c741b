//! Motion Protocol Implementations
//!
//! This library provides wire-protocol codecs and request/response plumbing
//! for motor controllers. Protocols are feature-gated for selective
//! compilation.
//!
//! # Features
//!
//! - `herzborg` - Herzborg curtain-motor serial protocol (default)
//! - `serial` - concrete serial-port transport via `tokio-serial`
//!
//! # Architecture
//!
//! Each protocol module is layered the same way: a stateless frame codec
//! over a pure checksum routine, a closed function/address catalog, and a
//! transaction correlator that drives a `motion_comlink::Transport`.

#[cfg(feature = "herzborg")]
pub mod herzborg;

// Re-export common types for convenience
pub use motion_comlink::{ComLinkError, ConnectionState, Transport};
