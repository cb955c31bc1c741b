//! Transport session management
//!
//! Concrete `Transport` implementations for Herzborg controllers attached
//! over TCP device servers or (with the `serial` feature) directly to a
//! serial port.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, error, info};

use motion_comlink::{ComLinkError, Result, Transport};

#[cfg(feature = "serial")]
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Read buffer size; comfortably above the largest frame
const READ_BUF_LEN: usize = 256;

/// Connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    // TCP parameters
    pub host: Option<String>,
    pub port: Option<u16>,

    // Serial parameters
    #[cfg(feature = "serial")]
    pub device: Option<String>,
    #[cfg(feature = "serial")]
    pub baud_rate: Option<u32>,
    #[cfg(feature = "serial")]
    pub data_bits: Option<u8>,
    #[cfg(feature = "serial")]
    pub stop_bits: Option<u8>,
    #[cfg(feature = "serial")]
    pub parity: Option<String>,

    // Common parameters
    pub timeout: Duration,
}

/// Transport session to a motor controller
#[derive(Debug)]
pub enum MotionConnection {
    /// TCP connection (serial device server)
    Tcp(TcpStream),
    /// Direct serial connection
    #[cfg(feature = "serial")]
    Serial(SerialStream),
}

impl MotionConnection {
    /// Open a TCP connection
    pub async fn connect_tcp(host: &str, port: u16, timeout_duration: Duration) -> Result<Self> {
        let addr = format!("{host}:{port}");
        debug!("TCP connecting: {}", addr);

        match timeout(timeout_duration, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => {
                // Command frames are tiny; never batch them
                if let Err(e) = stream.set_nodelay(true) {
                    debug!("TCP_NODELAY: {}", e);
                }

                info!("TCP connected: {}", addr);
                Ok(MotionConnection::Tcp(stream))
            },
            Ok(Err(e)) => {
                error!("TCP err: {} - {}", addr, e);
                Err(ComLinkError::Connection(format!(
                    "Failed to connect to {addr}: {e}"
                )))
            },
            Err(_) => {
                debug!("TCP timeout: {}", addr);
                Err(ComLinkError::Timeout(format!(
                    "Connection to {addr} timed out"
                )))
            },
        }
    }

    /// Open a serial connection
    #[cfg(feature = "serial")]
    pub async fn connect_serial(
        device: &str,
        baud_rate: u32,
        data_bits: u8,
        stop_bits: u8,
        parity: &str,
        timeout_duration: Duration,
    ) -> Result<Self> {
        debug!("Serial: {} @{}baud", device, baud_rate);

        let parity = match parity {
            "Even" => tokio_serial::Parity::Even,
            "Odd" => tokio_serial::Parity::Odd,
            _ => tokio_serial::Parity::None,
        };

        let data_bits = match data_bits {
            5 => tokio_serial::DataBits::Five,
            6 => tokio_serial::DataBits::Six,
            7 => tokio_serial::DataBits::Seven,
            _ => tokio_serial::DataBits::Eight,
        };

        let stop_bits = match stop_bits {
            2 => tokio_serial::StopBits::Two,
            _ => tokio_serial::StopBits::One,
        };

        match tokio_serial::new(device, baud_rate)
            .data_bits(data_bits)
            .parity(parity)
            .stop_bits(stop_bits)
            .timeout(timeout_duration)
            .open_native_async()
        {
            Ok(stream) => {
                info!("Serial opened: {}", device);
                Ok(MotionConnection::Serial(stream))
            },
            Err(e) => {
                error!("Serial err: {} - {}", device, e);
                Err(ComLinkError::Connection(format!(
                    "Failed to open serial port {device}: {e}"
                )))
            },
        }
    }

    /// Open a connection from parameters, dispatching on what is configured
    pub async fn from_params(params: &ConnectionParams) -> Result<Self> {
        #[cfg(feature = "serial")]
        if let Some(device) = &params.device {
            return Self::connect_serial(
                device,
                params.baud_rate.unwrap_or(9600),
                params.data_bits.unwrap_or(8),
                params.stop_bits.unwrap_or(1),
                params.parity.as_deref().unwrap_or("None"),
                params.timeout,
            )
            .await;
        }

        match (&params.host, params.port) {
            (Some(host), Some(port)) => Self::connect_tcp(host, port, params.timeout).await,
            _ => Err(ComLinkError::Config(
                "neither serial device nor TCP host/port configured".to_string(),
            )),
        }
    }

    /// Check if connection is TCP
    pub fn is_tcp(&self) -> bool {
        matches!(self, MotionConnection::Tcp(_))
    }
}

#[async_trait]
impl Transport for MotionConnection {
    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            MotionConnection::Tcp(stream) => {
                stream.write_all(bytes).await.map_err(|e| {
                    error!("TCP TX: {}", e);
                    ComLinkError::Io(format!("TCP send error: {e}"))
                })?;
                debug!("TCP TX: {}B", bytes.len());
            },
            #[cfg(feature = "serial")]
            MotionConnection::Serial(port) => {
                port.write_all(bytes).await.map_err(|e| {
                    error!("Serial TX: {}", e);
                    ComLinkError::Io(format!("Serial send error: {e}"))
                })?;
                port.flush().await.map_err(|e| {
                    error!("Serial flush: {}", e);
                    ComLinkError::Io(format!("Serial flush error: {e}"))
                })?;
                debug!("Serial TX: {}B", bytes.len());
            },
        }
        Ok(())
    }

    async fn read_available(&mut self) -> Result<Vec<u8>> {
        let mut buf = [0u8; READ_BUF_LEN];
        let n = match self {
            MotionConnection::Tcp(stream) => stream.read(&mut buf).await.map_err(|e| {
                error!("TCP RX: {}", e);
                ComLinkError::Io(format!("TCP read error: {e}"))
            })?,
            #[cfg(feature = "serial")]
            MotionConnection::Serial(port) => port.read(&mut buf).await.map_err(|e| {
                error!("Serial RX: {}", e);
                ComLinkError::Io(format!("Serial read error: {e}"))
            })?,
        };
        debug!("RX: {}B", n);
        Ok(buf[..n].to_vec())
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            MotionConnection::Tcp(stream) => {
                stream.shutdown().await.map_err(|e| {
                    ComLinkError::Io(format!("TCP shutdown error: {e}"))
                })?;
            },
            #[cfg(feature = "serial")]
            MotionConnection::Serial(_) => {
                // Dropping the stream closes the port handle
            },
        }
        Ok(())
    }
}
