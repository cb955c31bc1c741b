//! Motion Communication Link Library
//!
//! Core communication abstractions for motor-controller protocols.
//!
//! # Architecture
//!
//! This library provides:
//! - **Core Traits**: `Transport` for byte-stream sessions, `ConnectionState`
//! - **Error Types**: `ComLinkError` and the crate-wide `Result` alias
//!
//! Protocol implementations live in `motion-protocols` and depend only on
//! these abstractions, so a protocol can be exercised against a socket, a
//! serial port, or an in-memory mock without code changes.

pub mod error;
pub mod traits;

// Re-export core types
pub use error::{ComLinkError, Result};
pub use traits::{ConnectionState, Transport};
