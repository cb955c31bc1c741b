//! Frame encoding and decoding
//!
//! A Herzborg frame is `[0x55][addr_lo][addr_hi][function][data_address]`
//! followed by an optional payload and a little-endian CRC16 over everything
//! before it. Decoded frames use a fixed-size stack buffer; every frame shape
//! is statically bounded so no heap growth is needed.

use thiserror::Error;
use tracing::{debug, trace};

use super::catalog::Function;
use super::constants::{
    CRC_LEN, HEADER_LEN, MAX_FRAME_LEN, MIN_FRAME_LEN, START_BYTE, WRITE_SINGLE_LEN,
};
use super::crc::crc16;

/// Frame decode failures.
///
/// Wire bytes are treated as noise-controlled: every malformed shape maps to
/// a typed error and nothing here panics or reads out of bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the minimum frame; caller should keep buffering
    #[error("frame truncated: {0} bytes, minimum is {MIN_FRAME_LEN}")]
    Truncated(usize),

    /// Larger than any defined frame shape
    #[error("frame too long: {0} bytes, maximum is {MAX_FRAME_LEN}")]
    Oversized(usize),

    /// First byte is not the protocol marker; caller may resynchronize
    #[error("bad start marker: 0x{0:02X}")]
    BadStart(u8),

    /// Structurally well-formed but corrupted in transit
    #[error("CRC mismatch: calculated 0x{calculated:04X}, received 0x{received:04X}")]
    CrcMismatch { calculated: u16, received: u16 },

    /// Function byte outside the closed catalog
    #[error("unknown function code: 0x{0:02X}")]
    UnknownFunction(u8),

    /// Control action byte outside the closed catalog
    #[error("unknown control code: 0x{0:02X}")]
    UnknownControlCode(u8),

    /// Register address byte outside the closed catalog
    #[error("unknown data address: 0x{0:02X}")]
    UnknownDataAddress(u8),

    /// Payload access past the declared data length
    #[error("payload offset {offset} out of range (declared length {declared})")]
    PayloadOutOfRange { offset: usize, declared: usize },
}

/// Encode a request frame.
///
/// - No value: 5-byte header + CRC (query / parameterless control).
/// - Value with a non-`Write` function: the value byte follows the header
///   directly (control action argument).
/// - Value with [`Function::Write`]: a `0x01` length prefix is inserted
///   before the value, signalling a length-prefixed payload to the receiver.
///
/// The CRC is always computed over every preceding byte.
pub fn encode(
    device_address: u16,
    function: Function,
    data_address: u8,
    value: Option<u8>,
) -> Vec<u8> {
    let mut frame = Vec::with_capacity(MIN_FRAME_LEN + 2);

    frame.push(START_BYTE);
    frame.extend_from_slice(&device_address.to_le_bytes());
    frame.push(function.wire_byte());
    frame.push(data_address);

    if let Some(value) = value {
        if function == Function::Write {
            frame.push(WRITE_SINGLE_LEN);
        }
        frame.push(value);
    }

    let crc = crc16(&frame);
    frame.extend_from_slice(&crc.to_le_bytes());

    debug!(
        "Building frame: dev={:04X}, FC={:02X} ({}), addr={:02X}, len={}",
        device_address,
        function.wire_byte(),
        function.description(),
        data_address,
        frame.len()
    );

    frame
}

/// A decoded, CRC-validated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Fixed-size buffer (stack)
    data: [u8; MAX_FRAME_LEN],
    /// Actual frame length including CRC
    len: usize,
}

impl Frame {
    /// Decode and validate a raw buffer.
    ///
    /// Length is checked before any indexing, so truncated serial reads can
    /// never cause out-of-bounds access. An invalid frame is returned as an
    /// error, never coerced into a valid one.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.len() < MIN_FRAME_LEN {
            return Err(DecodeError::Truncated(raw.len()));
        }
        if raw.len() > MAX_FRAME_LEN {
            return Err(DecodeError::Oversized(raw.len()));
        }
        if raw[0] != START_BYTE {
            return Err(DecodeError::BadStart(raw[0]));
        }

        let crc_pos = raw.len() - CRC_LEN;
        let received = u16::from_le_bytes([raw[crc_pos], raw[crc_pos + 1]]);
        let calculated = crc16(&raw[..crc_pos]);
        if received != calculated {
            return Err(DecodeError::CrcMismatch {
                calculated,
                received,
            });
        }

        let mut data = [0u8; MAX_FRAME_LEN];
        data[..raw.len()].copy_from_slice(raw);

        trace!("Frame decoded: {}B {}", raw.len(), hex::encode(raw));

        Ok(Self {
            data,
            len: raw.len(),
        })
    }

    /// Full frame bytes including CRC
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Total frame length including CRC
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Frames are never empty; kept for slice-like symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Target device address (little-endian on the wire)
    #[inline]
    pub fn device_address(&self) -> u16 {
        u16::from_le_bytes([self.data[1], self.data[2]])
    }

    /// Raw function byte
    #[inline]
    pub fn function_byte(&self) -> u8 {
        self.data[3]
    }

    /// Typed function code; unknown bytes are a typed error
    pub fn function(&self) -> Result<Function, DecodeError> {
        Function::from_wire(self.function_byte())
    }

    /// Register or control-action code; meaning depends on the function
    #[inline]
    pub fn data_address(&self) -> u8 {
        self.data[4]
    }

    /// Payload bytes between the header and the CRC
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[HEADER_LEN..self.len - CRC_LEN]
    }

    /// Declared data length: the byte immediately following the header.
    ///
    /// Present only on frames with a length-prefixed payload (register
    /// replies and writes); zero when the frame has no payload at all.
    #[inline]
    pub fn data_len(&self) -> u8 {
        if self.len > MIN_FRAME_LEN {
            self.data[HEADER_LEN]
        } else {
            0
        }
    }

    /// Indexed payload byte, bounds-checked against the declared length
    /// and the physical frame extent.
    pub fn data(&self, offset: usize) -> Result<u8, DecodeError> {
        let declared = usize::from(self.data_len());
        let index = HEADER_LEN + 1 + offset;
        if offset >= declared || index >= self.len - CRC_LEN {
            return Err(DecodeError::PayloadOutOfRange { offset, declared });
        }
        Ok(self.data[index])
    }
}
