//! Herzborg protocol constants
//!
//! Byte codes and frame-layout sizes for the Herzborg curtain-motor wire
//! protocol. All multi-byte wire fields are little-endian.

/// Frame start marker, first byte of every frame
pub const START_BYTE: u8 = 0x55;

/// Header length: start(1) + device address(2) + function(1) + data address(1)
pub const HEADER_LEN: usize = 5;

/// CRC trailer length
pub const CRC_LEN: usize = 2;

/// Minimum total frame length (header + CRC, zero payload)
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;

/// Maximum total frame length.
///
/// The longest defined frame is a write with a length-prefixed payload; the
/// bound leaves headroom for multi-byte read replies.
pub const MAX_FRAME_LEN: usize = 32;

/// Length prefix emitted for single-byte write payloads
pub const WRITE_SINGLE_LEN: u8 = 0x01;

// ============================================================================
// Function codes
// ============================================================================

/// Read a data register
pub const FUNC_READ: u8 = 0x01;
/// Write a data register (length-prefixed payload)
pub const FUNC_WRITE: u8 = 0x02;
/// Execute a control action
pub const FUNC_CONTROL: u8 = 0x03;
/// Request device status
pub const FUNC_REQUEST: u8 = 0x04;

// ============================================================================
// Control action codes (data-address field of a Control frame)
// ============================================================================

pub const CTRL_OPEN: u8 = 0x01;
pub const CTRL_CLOSE: u8 = 0x02;
pub const CTRL_STOP: u8 = 0x03;
pub const CTRL_SET_PERCENT: u8 = 0x04;
pub const CTRL_DELETE_LIMIT: u8 = 0x07;
pub const CTRL_RESTORE_DEFAULT: u8 = 0x08;
pub const CTRL_SET_CONTEXT: u8 = 0x09;
pub const CTRL_RUN_CONTEXT: u8 = 0x0A;
pub const CTRL_DELETE_CONTEXT: u8 = 0x0B;

// ============================================================================
// Data register addresses (data-address field of Read/Write frames)
// ============================================================================

pub const DATA_ID_LOW: u8 = 0x00;
pub const DATA_ID_HIGH: u8 = 0x01;
pub const DATA_POSITION: u8 = 0x02;
pub const DATA_DEFAULT_DIRECTION: u8 = 0x03;
pub const DATA_HAND_START: u8 = 0x04;
pub const DATA_MODE: u8 = 0x05;
pub const DATA_EXT_SWITCH: u8 = 0x27;
pub const DATA_EXT_HV_SWITCH: u8 = 0x28;
