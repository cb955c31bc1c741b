//! Herzborg Curtain-Motor Protocol
//!
//! This module implements the Herzborg serial wire protocol: a single-master,
//! half-duplex request/response protocol used by curtain and blind motor
//! controllers. Every exchange is one outbound frame answered by one inbound
//! frame on the same line.
//!
//! # Architecture
//!
//! ```text
//! motion-protocols/herzborg
//!     ├── crc        (CRC16 integrity check, Modbus-reflected polynomial)
//!     ├── frame      (frame encode/decode with start marker and CRC)
//!     ├── catalog    (closed function / control / data-address code sets)
//!     ├── correlator (single-in-flight request/response pairing + timeout)
//!     ├── connection (TCP and serial Transport implementations)
//!     └── client     (device-handler convenience operations)
//! ```
//!
//! The codec layers (`crc`, `frame`, `catalog`) are stateless and reentrant;
//! all per-session state lives in one `Correlator` per transport.

mod catalog;
mod client;
mod connection;
pub mod constants;
mod correlator;
mod crc;
mod frame;

pub use catalog::{ControlAddress, DataAddress, Function};
pub use client::HerzborgClient;
pub use connection::ConnectionParams;
pub use connection::MotionConnection;
pub use correlator::{Correlator, CorrelatorError, TransactionHandle};
pub use crc::crc16;
pub use frame::{encode, DecodeError, Frame};

pub use constants::{HEADER_LEN, MAX_FRAME_LEN, MIN_FRAME_LEN, START_BYTE};
