//! Function and address catalog
//!
//! Closed sets of wire codes for the Herzborg protocol. Each variant carries
//! its fixed byte; decoding goes through explicit match tables so an unknown
//! code is a typed error, never silently mapped to the nearest known case.

use super::constants;
use super::frame::DecodeError;

/// Protocol function code (byte 3 of the frame header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Read a data register
    Read,
    /// Write a data register (length-prefixed payload)
    Write,
    /// Execute a control action
    Control,
    /// Request device status
    Request,
}

impl Function {
    /// Wire byte for this function
    #[inline]
    pub fn wire_byte(self) -> u8 {
        match self {
            Function::Read => constants::FUNC_READ,
            Function::Write => constants::FUNC_WRITE,
            Function::Control => constants::FUNC_CONTROL,
            Function::Request => constants::FUNC_REQUEST,
        }
    }

    /// Decode a wire byte into a function code
    pub fn from_wire(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            constants::FUNC_READ => Ok(Function::Read),
            constants::FUNC_WRITE => Ok(Function::Write),
            constants::FUNC_CONTROL => Ok(Function::Control),
            constants::FUNC_REQUEST => Ok(Function::Request),
            other => Err(DecodeError::UnknownFunction(other)),
        }
    }

    /// Human-readable name, for logs
    pub fn description(self) -> &'static str {
        match self {
            Function::Read => "Read Register",
            Function::Write => "Write Register",
            Function::Control => "Control Action",
            Function::Request => "Status Request",
        }
    }
}

/// Control action code (data-address field of a Control frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAddress {
    Open,
    Close,
    Stop,
    /// Move to a target position percentage (value byte required)
    SetPercent,
    DeleteLimit,
    RestoreDefault,
    /// Store the current position as a context (value byte selects the slot)
    SetContext,
    RunContext,
    DeleteContext,
}

impl ControlAddress {
    /// Wire byte for this control action
    #[inline]
    pub fn wire_byte(self) -> u8 {
        match self {
            ControlAddress::Open => constants::CTRL_OPEN,
            ControlAddress::Close => constants::CTRL_CLOSE,
            ControlAddress::Stop => constants::CTRL_STOP,
            ControlAddress::SetPercent => constants::CTRL_SET_PERCENT,
            ControlAddress::DeleteLimit => constants::CTRL_DELETE_LIMIT,
            ControlAddress::RestoreDefault => constants::CTRL_RESTORE_DEFAULT,
            ControlAddress::SetContext => constants::CTRL_SET_CONTEXT,
            ControlAddress::RunContext => constants::CTRL_RUN_CONTEXT,
            ControlAddress::DeleteContext => constants::CTRL_DELETE_CONTEXT,
        }
    }

    /// Decode a wire byte into a control action
    pub fn from_wire(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            constants::CTRL_OPEN => Ok(ControlAddress::Open),
            constants::CTRL_CLOSE => Ok(ControlAddress::Close),
            constants::CTRL_STOP => Ok(ControlAddress::Stop),
            constants::CTRL_SET_PERCENT => Ok(ControlAddress::SetPercent),
            constants::CTRL_DELETE_LIMIT => Ok(ControlAddress::DeleteLimit),
            constants::CTRL_RESTORE_DEFAULT => Ok(ControlAddress::RestoreDefault),
            constants::CTRL_SET_CONTEXT => Ok(ControlAddress::SetContext),
            constants::CTRL_RUN_CONTEXT => Ok(ControlAddress::RunContext),
            constants::CTRL_DELETE_CONTEXT => Ok(ControlAddress::DeleteContext),
            other => Err(DecodeError::UnknownControlCode(other)),
        }
    }

    /// Whether this action carries a value byte in the request frame
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            ControlAddress::SetPercent
                | ControlAddress::SetContext
                | ControlAddress::RunContext
                | ControlAddress::DeleteContext
        )
    }
}

/// Data register address (data-address field of Read/Write frames)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataAddress {
    /// Device identifier, low byte
    IdLow,
    /// Device identifier, high byte
    IdHigh,
    /// Current position in percent
    Position,
    /// Default running direction
    DefaultDirection,
    /// Hand-start (touch activation) switch
    HandStart,
    /// Operating mode
    Mode,
    /// Extended dry-contact switch register
    ExtSwitch,
    /// Extended high-voltage switch register
    ExtHvSwitch,
}

impl DataAddress {
    /// Wire byte for this register
    #[inline]
    pub fn wire_byte(self) -> u8 {
        match self {
            DataAddress::IdLow => constants::DATA_ID_LOW,
            DataAddress::IdHigh => constants::DATA_ID_HIGH,
            DataAddress::Position => constants::DATA_POSITION,
            DataAddress::DefaultDirection => constants::DATA_DEFAULT_DIRECTION,
            DataAddress::HandStart => constants::DATA_HAND_START,
            DataAddress::Mode => constants::DATA_MODE,
            DataAddress::ExtSwitch => constants::DATA_EXT_SWITCH,
            DataAddress::ExtHvSwitch => constants::DATA_EXT_HV_SWITCH,
        }
    }

    /// Decode a wire byte into a register address
    pub fn from_wire(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            constants::DATA_ID_LOW => Ok(DataAddress::IdLow),
            constants::DATA_ID_HIGH => Ok(DataAddress::IdHigh),
            constants::DATA_POSITION => Ok(DataAddress::Position),
            constants::DATA_DEFAULT_DIRECTION => Ok(DataAddress::DefaultDirection),
            constants::DATA_HAND_START => Ok(DataAddress::HandStart),
            constants::DATA_MODE => Ok(DataAddress::Mode),
            constants::DATA_EXT_SWITCH => Ok(DataAddress::ExtSwitch),
            constants::DATA_EXT_HV_SWITCH => Ok(DataAddress::ExtHvSwitch),
            other => Err(DecodeError::UnknownDataAddress(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_round_trip() {
        for func in [
            Function::Read,
            Function::Write,
            Function::Control,
            Function::Request,
        ] {
            assert_eq!(
                Function::from_wire(func.wire_byte()).expect("known function byte"),
                func
            );
        }
    }

    #[test]
    fn test_function_codes() {
        assert_eq!(Function::Read.wire_byte(), 0x01);
        assert_eq!(Function::Write.wire_byte(), 0x02);
        assert_eq!(Function::Control.wire_byte(), 0x03);
        assert_eq!(Function::Request.wire_byte(), 0x04);
    }

    #[test]
    fn test_unknown_function_rejected() {
        let err = Function::from_wire(0x7E).expect_err("0x7E is not a function code");
        assert!(matches!(err, DecodeError::UnknownFunction(0x7E)));
    }

    #[test]
    fn test_control_round_trip() {
        for ctrl in [
            ControlAddress::Open,
            ControlAddress::Close,
            ControlAddress::Stop,
            ControlAddress::SetPercent,
            ControlAddress::DeleteLimit,
            ControlAddress::RestoreDefault,
            ControlAddress::SetContext,
            ControlAddress::RunContext,
            ControlAddress::DeleteContext,
        ] {
            assert_eq!(
                ControlAddress::from_wire(ctrl.wire_byte()).expect("known control byte"),
                ctrl
            );
        }
    }

    #[test]
    fn test_control_gap_codes_rejected() {
        // 0x05 and 0x06 sit in a hole of the control code space
        assert!(matches!(
            ControlAddress::from_wire(0x05),
            Err(DecodeError::UnknownControlCode(0x05))
        ));
        assert!(matches!(
            ControlAddress::from_wire(0x06),
            Err(DecodeError::UnknownControlCode(0x06))
        ));
    }

    #[test]
    fn test_control_takes_value() {
        assert!(ControlAddress::SetPercent.takes_value());
        assert!(ControlAddress::RunContext.takes_value());
        assert!(!ControlAddress::Open.takes_value());
        assert!(!ControlAddress::Stop.takes_value());
    }

    #[test]
    fn test_data_address_round_trip() {
        for addr in [
            DataAddress::IdLow,
            DataAddress::IdHigh,
            DataAddress::Position,
            DataAddress::DefaultDirection,
            DataAddress::HandStart,
            DataAddress::Mode,
            DataAddress::ExtSwitch,
            DataAddress::ExtHvSwitch,
        ] {
            assert_eq!(
                DataAddress::from_wire(addr.wire_byte()).expect("known register byte"),
                addr
            );
        }
    }

    #[test]
    fn test_unknown_data_address_rejected() {
        let err = DataAddress::from_wire(0xFF).expect_err("0xFF is not a register");
        assert!(matches!(err, DecodeError::UnknownDataAddress(0xFF)));
    }
}
