//! End-to-end request/response exchanges against an in-memory device.
//!
//! A device emulator sits on the far end of a duplex pipe, validates each
//! request frame, and answers the way a Herzborg controller does: control
//! and write frames are acknowledged with an echoed header, reads return a
//! length-prefixed register value.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

use motion_comlink::{ComLinkError, Result as LinkResult, Transport};
use motion_protocols::herzborg::{
    crc16, DataAddress, Frame, Function, HerzborgClient,
};

struct PipeTransport(DuplexStream);

#[async_trait]
impl Transport for PipeTransport {
    async fn write(&mut self, bytes: &[u8]) -> LinkResult<()> {
        self.0
            .write_all(bytes)
            .await
            .map_err(|e| ComLinkError::Io(e.to_string()))
    }

    async fn read_available(&mut self) -> LinkResult<Vec<u8>> {
        let mut buf = [0u8; 64];
        let n = self
            .0
            .read(&mut buf)
            .await
            .map_err(|e| ComLinkError::Io(e.to_string()))?;
        Ok(buf[..n].to_vec())
    }

    async fn close(&mut self) -> LinkResult<()> {
        self.0
            .shutdown()
            .await
            .map_err(|e| ComLinkError::Io(e.to_string()))
    }
}

/// Register file served by the emulated device
fn register_value(address: u8) -> u8 {
    match address {
        0x00 => 0x34, // ID low
        0x01 => 0x12, // ID high
        0x02 => 0x2A, // position: 42%
        0x05 => 0x01, // mode
        _ => 0x00,
    }
}

async fn run_device(mut line: DuplexStream) {
    let mut buf = [0u8; 64];
    loop {
        let n = match line.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };

        let request = match Frame::decode(&buf[..n]) {
            Ok(frame) => frame,
            // A real controller stays silent on garbage
            Err(_) => continue,
        };

        let mut reply = vec![
            0x55,
            request.as_slice()[1],
            request.as_slice()[2],
            request.function_byte(),
            request.data_address(),
        ];
        if request.function() == Ok(Function::Read) {
            reply.push(0x01);
            reply.push(register_value(request.data_address()));
        }
        let crc = crc16(&reply);
        reply.extend_from_slice(&crc.to_le_bytes());

        if line.write_all(&reply).await.is_err() {
            return;
        }
    }
}

fn client_and_device() -> HerzborgClient<PipeTransport> {
    let (near, far) = tokio::io::duplex(256);
    tokio::spawn(run_device(far));
    HerzborgClient::new(PipeTransport(near), 0x0001)
        .with_request_timeout(Duration::from_millis(500))
}

#[tokio::test(start_paused = true)]
async fn control_actions_are_acknowledged() {
    let mut client = client_and_device();

    client.open().await.expect("open acknowledged");
    client.set_percent(42).await.expect("set_percent acknowledged");
    client.stop().await.expect("stop acknowledged");
    client.close().await.expect("close acknowledged");
}

#[tokio::test(start_paused = true)]
async fn registers_read_back() {
    let mut client = client_and_device();

    assert_eq!(client.read_position().await.expect("position"), 0x2A);
    assert_eq!(client.device_id().await.expect("device id"), 0x1234);
    assert_eq!(
        client
            .read_register(DataAddress::Mode)
            .await
            .expect("mode register"),
        0x01
    );
}

#[tokio::test(start_paused = true)]
async fn writes_round_trip_through_the_device() {
    let mut client = client_and_device();

    client
        .write_register(DataAddress::HandStart, 0x01)
        .await
        .expect("write acknowledged");
    client.run_context(2).await.expect("context run");
}

#[tokio::test(start_paused = true)]
async fn silence_times_out_and_frees_the_session() {
    // No device on the far end: requests go out, nothing answers
    let (near, _far) = tokio::io::duplex(256);
    let mut client = HerzborgClient::new(PipeTransport(near), 0x0001)
        .with_request_timeout(Duration::from_millis(100));

    let err = client.open().await.expect_err("no reply");
    assert!(err.to_string().contains("no valid reply"));

    // The session is immediately usable again
    let err = client.stop().await.expect_err("still no reply");
    assert!(err.to_string().contains("no valid reply"));
}
