//! Communication Link Error Types
//!
//! Core error types shared by transport and protocol implementations.

use thiserror::Error;

/// Result type for motion-comlink operations
pub type Result<T> = std::result::Result<T, ComLinkError>;

/// Communication link errors
#[derive(Debug, Error, Clone)]
pub enum ComLinkError {
    /// Protocol-level errors
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Not connected
    #[error("Not connected")]
    NotConnected,

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// Timeout errors
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Not supported
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl From<std::io::Error> for ComLinkError {
    fn from(err: std::io::Error) -> Self {
        ComLinkError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ComLinkError {
    fn from(err: serde_json::Error) -> Self {
        ComLinkError::InvalidData(format!("JSON error: {}", err))
    }
}

// Helper methods for creating errors
impl ComLinkError {
    pub fn protocol(msg: impl Into<String>) -> Self {
        ComLinkError::Protocol(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        ComLinkError::Connection(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        ComLinkError::Io(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        ComLinkError::Timeout(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        ComLinkError::InvalidData(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ComLinkError::Config(msg.into())
    }

    /// Check if this error indicates a need for reconnection
    pub fn needs_reconnect(&self) -> bool {
        match self {
            ComLinkError::Io(msg) => {
                msg.contains("Broken pipe")
                    || msg.contains("Connection reset")
                    || msg.contains("Connection refused")
                    || msg.contains("Connection aborted")
                    || msg.contains("Network is unreachable")
            },
            ComLinkError::Connection(_) => true,
            ComLinkError::NotConnected => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ComLinkError::protocol("bad frame");
        assert_eq!(err.to_string(), "Protocol error: bad frame");

        let err = ComLinkError::Timeout("no reply in 500ms".to_string());
        assert_eq!(err.to_string(), "Timeout: no reply in 500ms");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Broken pipe");
        let err: ComLinkError = io_err.into();
        assert!(matches!(err, ComLinkError::Io(_)));
        assert!(err.needs_reconnect());
    }

    #[test]
    fn test_needs_reconnect() {
        assert!(ComLinkError::NotConnected.needs_reconnect());
        assert!(ComLinkError::connection("refused").needs_reconnect());
        assert!(!ComLinkError::protocol("bad CRC").needs_reconnect());
        assert!(!ComLinkError::timeout("slow device").needs_reconnect());
    }
}
