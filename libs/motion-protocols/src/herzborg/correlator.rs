//! Transaction correlator
//!
//! Serializes request/response exchanges over a half-duplex channel. The
//! physical bus is single-master: exactly one transaction may be outstanding
//! per transport session, and the next valid inbound frame answers it.
//!
//! The in-flight slot is a one-permit semaphore owned by the
//! [`TransactionHandle`], so every way a transaction can end - reply,
//! timeout, decode failure, or the caller dropping an in-flight
//! `await_reply` - releases the slot exactly once.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use motion_comlink::{ComLinkError, Transport};

use super::constants::{MIN_FRAME_LEN, START_BYTE};
use super::frame::{DecodeError, Frame};

/// Default pause that marks the end of an inbound frame
const DEFAULT_INTER_BYTE_TIMEOUT: Duration = Duration::from_millis(50);

/// Correlator failures, all local to one transaction
#[derive(Debug, Error)]
pub enum CorrelatorError {
    /// A second send was attempted while a transaction is outstanding.
    /// Caller error; never queued or retried internally.
    #[error("channel busy: a transaction is already outstanding")]
    ChannelBusy,

    /// No valid reply within the deadline; recoverable, caller may retry
    #[error("no valid reply within {0:?}")]
    Timeout(Duration),

    /// Reply bytes arrived but failed frame validation
    #[error("malformed reply: {0}")]
    Malformed(#[from] DecodeError),

    /// Request rejected before any bytes were written
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure during the exchange
    #[error("transport error: {0}")]
    Link(#[from] ComLinkError),
}

/// Proof of an open transaction.
///
/// Holds the session's single in-flight permit; dropping the handle (or the
/// `await_reply` future that owns it) releases the slot.
#[derive(Debug)]
pub struct TransactionHandle {
    _permit: OwnedSemaphorePermit,
}

/// Request/response correlator for one transport session.
///
/// The frame codec underneath is stateless; all session state lives here.
/// Independent sessions (multiple serial ports) use independent correlators.
pub struct Correlator<T: Transport> {
    transport: T,
    slot: Arc<Semaphore>,
    inter_byte_timeout: Duration,
}

impl<T: Transport> Correlator<T> {
    /// Create a correlator owning the given transport session
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            slot: Arc::new(Semaphore::new(1)),
            inter_byte_timeout: DEFAULT_INTER_BYTE_TIMEOUT,
        }
    }

    /// Override the inter-byte pause used to detect frame end
    pub fn with_inter_byte_timeout(mut self, inter_byte_timeout: Duration) -> Self {
        self.inter_byte_timeout = inter_byte_timeout;
        self
    }

    /// Whether no transaction is currently outstanding
    pub fn is_idle(&self) -> bool {
        self.slot.available_permits() == 1
    }

    /// Write an encoded request frame and open a transaction.
    ///
    /// Fails with [`CorrelatorError::ChannelBusy`] if a transaction is
    /// already outstanding; the existing transaction is not touched.
    pub async fn send(&mut self, request: &[u8]) -> Result<TransactionHandle, CorrelatorError> {
        let permit = self
            .slot
            .clone()
            .try_acquire_owned()
            .map_err(|_| CorrelatorError::ChannelBusy)?;

        // A write failure closes the transaction: the permit drops with the
        // error path and the slot is free for the next send.
        self.transport.write(request).await?;
        debug!("TX: {}B {}", request.len(), hex::encode(request));

        Ok(TransactionHandle { _permit: permit })
    }

    /// Wait for the frame that answers the outstanding request.
    ///
    /// Resolves with the first CRC-valid frame, a [`CorrelatorError::Timeout`]
    /// when the deadline elapses, or [`CorrelatorError::Malformed`] when the
    /// reply fails validation. The transaction is closed on every outcome.
    pub async fn await_reply(
        &mut self,
        handle: TransactionHandle,
        deadline: Duration,
    ) -> Result<Frame, CorrelatorError> {
        let inter_byte = self.inter_byte_timeout;
        let transport = &mut self.transport;

        let outcome = timeout(deadline, Self::receive_frame(transport, inter_byte)).await;

        // Slot released here on every outcome; a cancelled future releases
        // it through the handle's own drop instead.
        drop(handle);

        match outcome {
            Ok(result) => result,
            Err(_) => {
                debug!("RX timeout after {:?}", deadline);
                Err(CorrelatorError::Timeout(deadline))
            },
        }
    }

    /// Send a request and wait for its reply in one call
    pub async fn transact(
        &mut self,
        request: &[u8],
        deadline: Duration,
    ) -> Result<Frame, CorrelatorError> {
        let handle = self.send(request).await?;
        self.await_reply(handle, deadline).await
    }

    /// Consume the correlator and return the underlying transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Buffer inbound chunks until an inter-byte pause marks frame end,
    /// then decode exactly once.
    async fn receive_frame(
        transport: &mut T,
        inter_byte: Duration,
    ) -> Result<Frame, CorrelatorError> {
        let mut buffer: Vec<u8> = Vec::with_capacity(MIN_FRAME_LEN * 2);

        loop {
            match timeout(inter_byte, transport.read_available()).await {
                Ok(Ok(chunk)) => {
                    if chunk.is_empty() {
                        warn!("RX channel closed");
                        return Err(CorrelatorError::Link(ComLinkError::Connection(
                            "channel closed while awaiting reply".to_string(),
                        )));
                    }
                    trace!("RX chunk: {}B {}", chunk.len(), hex::encode(&chunk));
                    buffer.extend_from_slice(&chunk);

                    // A wrong first byte can never become a valid frame;
                    // fail fast and let the caller resynchronize.
                    if buffer[0] != START_BYTE {
                        return Err(CorrelatorError::Malformed(DecodeError::BadStart(buffer[0])));
                    }
                },
                Ok(Err(e)) => {
                    warn!("RX error: {}", e);
                    return Err(CorrelatorError::Link(e));
                },
                Err(_) => {
                    // Inter-byte pause: frame should be complete
                    if buffer.len() >= MIN_FRAME_LEN {
                        debug!("RX: {}B {}", buffer.len(), hex::encode(&buffer));
                        return Ok(Frame::decode(&buffer)?);
                    }
                    // Nothing (or a fragment) so far: keep waiting inside
                    // the overall deadline
                },
            }
        }
    }
}
