//! Device-handler convenience layer
//!
//! `HerzborgClient` turns logical motor commands into catalog-typed frames,
//! runs them through the correlator, and interprets the replies. One client
//! per addressed device; independent devices on the same line can share a
//! transport by sharing the correlator's session externally.

use std::time::Duration;

use tracing::debug;

use motion_comlink::Transport;

use super::catalog::{ControlAddress, DataAddress, Function};
use super::correlator::{Correlator, CorrelatorError};
use super::frame::{encode, Frame};

/// Default reply deadline for one exchange
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

/// High-level client for one Herzborg motor controller
pub struct HerzborgClient<T: Transport> {
    correlator: Correlator<T>,
    device_address: u16,
    request_timeout: Duration,
}

impl<T: Transport> HerzborgClient<T> {
    /// Create a client for the device at `device_address`
    pub fn new(transport: T, device_address: u16) -> Self {
        Self {
            correlator: Correlator::new(transport),
            device_address,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-exchange reply deadline
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Consume the client and return the underlying transport
    pub fn into_inner(self) -> T {
        self.correlator.into_inner()
    }

    // ========================================================================
    // Control actions
    // ========================================================================

    /// Run to the open limit
    pub async fn open(&mut self) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::Open, None).await.map(|_| ())
    }

    /// Run to the close limit
    pub async fn close(&mut self) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::Close, None).await.map(|_| ())
    }

    /// Stop movement immediately
    pub async fn stop(&mut self) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::Stop, None).await.map(|_| ())
    }

    /// Move to a target position in percent (0 = open limit, 100 = closed)
    pub async fn set_percent(&mut self, percent: u8) -> Result<(), CorrelatorError> {
        if percent > 100 {
            return Err(CorrelatorError::InvalidRequest(format!(
                "target percentage {percent} out of range 0-100"
            )));
        }
        self.control(ControlAddress::SetPercent, Some(percent))
            .await
            .map(|_| ())
    }

    /// Erase the stored travel limits
    pub async fn delete_limit(&mut self) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::DeleteLimit, None)
            .await
            .map(|_| ())
    }

    /// Restore factory defaults
    pub async fn restore_default(&mut self) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::RestoreDefault, None)
            .await
            .map(|_| ())
    }

    /// Store the current position as context `slot`
    pub async fn set_context(&mut self, slot: u8) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::SetContext, Some(slot))
            .await
            .map(|_| ())
    }

    /// Run to the position stored in context `slot`
    pub async fn run_context(&mut self, slot: u8) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::RunContext, Some(slot))
            .await
            .map(|_| ())
    }

    /// Erase context `slot`
    pub async fn delete_context(&mut self, slot: u8) -> Result<(), CorrelatorError> {
        self.control(ControlAddress::DeleteContext, Some(slot))
            .await
            .map(|_| ())
    }

    /// Execute a control action, validating its value-byte arity
    pub async fn control(
        &mut self,
        action: ControlAddress,
        value: Option<u8>,
    ) -> Result<Frame, CorrelatorError> {
        if action.takes_value() && value.is_none() {
            return Err(CorrelatorError::InvalidRequest(format!(
                "control action {action:?} requires a value byte"
            )));
        }
        if !action.takes_value() && value.is_some() {
            return Err(CorrelatorError::InvalidRequest(format!(
                "control action {action:?} takes no value byte"
            )));
        }

        debug!("Control: dev={:04X} {:?}", self.device_address, action);
        let request = encode(
            self.device_address,
            Function::Control,
            action.wire_byte(),
            value,
        );
        self.correlator.transact(&request, self.request_timeout).await
    }

    // ========================================================================
    // Register access
    // ========================================================================

    /// Read a single data register
    pub async fn read_register(&mut self, address: DataAddress) -> Result<u8, CorrelatorError> {
        let request = encode(
            self.device_address,
            Function::Read,
            address.wire_byte(),
            None,
        );
        let reply = self.correlator.transact(&request, self.request_timeout).await?;
        Ok(reply.data(0)?)
    }

    /// Write a single data register
    pub async fn write_register(
        &mut self,
        address: DataAddress,
        value: u8,
    ) -> Result<(), CorrelatorError> {
        let request = encode(
            self.device_address,
            Function::Write,
            address.wire_byte(),
            Some(value),
        );
        self.correlator
            .transact(&request, self.request_timeout)
            .await
            .map(|_| ())
    }

    /// Current position in percent
    pub async fn read_position(&mut self) -> Result<u8, CorrelatorError> {
        self.read_register(DataAddress::Position).await
    }

    /// Device identifier assembled from the low and high ID registers
    pub async fn device_id(&mut self) -> Result<u16, CorrelatorError> {
        let low = self.read_register(DataAddress::IdLow).await?;
        let high = self.read_register(DataAddress::IdHigh).await?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Poll device status
    pub async fn request_status(&mut self) -> Result<Frame, CorrelatorError> {
        let request = encode(self.device_address, Function::Request, 0x00, None);
        self.correlator.transact(&request, self.request_timeout).await
    }
}
