//! Core Communication Traits
//!
//! This module defines the fundamental traits for transport sessions.
//! Protocol implementations (Herzborg, and future device buses) depend on
//! these traits rather than on concrete socket or serial-port types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Connection State
// ============================================================================

/// Connection state for communication channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConnectionState {
    /// Not initialized yet
    #[default]
    Uninitialized,
    /// Attempting to connect
    Connecting,
    /// Successfully connected
    Connected,
    /// Connection failed, will retry
    Disconnected,
    /// Connection closed normally
    Closed,
    /// Fatal error, won't retry
    Failed,
}

impl ConnectionState {
    /// Check if state represents an active connection
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Check if state allows retry
    pub fn can_retry(&self) -> bool {
        matches!(self, ConnectionState::Disconnected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Uninitialized => write!(f, "UNINITIALIZED"),
            ConnectionState::Connecting => write!(f, "CONNECTING"),
            ConnectionState::Connected => write!(f, "CONNECTED"),
            ConnectionState::Disconnected => write!(f, "DISCONNECTED"),
            ConnectionState::Closed => write!(f, "CLOSED"),
            ConnectionState::Failed => write!(f, "FAILED"),
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Byte-stream transport owned by a surrounding serial/socket session.
///
/// Implementations deliver raw, unframed bytes; framing and validation are
/// the protocol layer's job. A transport is half-duplex from the protocol's
/// point of view: callers must not interleave writes with an outstanding
/// read exchange.
#[async_trait]
pub trait Transport: Send {
    /// Write the full buffer to the underlying channel
    async fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read whatever bytes the channel currently has.
    ///
    /// Suspends until at least one byte is available or the channel fails.
    /// An empty return is reserved for end-of-stream.
    async fn read_available(&mut self) -> Result<Vec<u8>>;

    /// Close the underlying channel
    async fn close(&mut self) -> Result<()>;
}
