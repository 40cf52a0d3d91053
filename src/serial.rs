//! Serial transport seam.
//!
//! The driver never talks to a concrete port type. It writes through
//! [`SharedPort`] handles produced by a [`PortOpener`], so tests can substitute
//! `tokio::io::duplex` streams or recording mocks for real hardware.
//!
//! # Types
//!
//! - [`SerialPortIO`]: Trait alias combining AsyncRead + AsyncWrite for serial ports
//! - [`DynSerial`]: Type-erased boxed serial port
//! - [`SharedPort`]: Thread-safe shared serial port
//! - [`PortOpener`]: Opens a port for a device path
//! - [`NativeOpener`]: tokio-serial backed opener (feature `serial`)

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;

/// RX09 baud rate.
pub const BAUD_RATE: u32 = 57_600;

// =============================================================================
// Serial Port Trait
// =============================================================================

/// Trait alias for async serial port I/O.
///
/// Any type implementing `AsyncRead + AsyncWrite + Unpin + Send` can be used
/// as a serial port, including `tokio_serial::SerialStream` and
/// `tokio::io::DuplexStream`.
pub trait SerialPortIO: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> SerialPortIO for T {}

/// Type-erased boxed serial port.
pub type DynSerial = Box<dyn SerialPortIO>;

/// Serial port shared by every channel bound to one device path.
///
/// The mutex keeps writes from different channels from interleaving on the
/// wire.
pub type SharedPort = Arc<Mutex<DynSerial>>;

/// Wrap an opened port for sharing.
pub fn wrap_shared(port: DynSerial) -> SharedPort {
    Arc::new(Mutex::new(port))
}

// =============================================================================
// Port Opener
// =============================================================================

/// Opens the transport for a device path.
///
/// Called at most once per path by [`ConnectionRegistry`](crate::ConnectionRegistry).
#[async_trait]
pub trait PortOpener: Send + Sync {
    /// Open `path` with the RX09 line settings (57600-8-N-1).
    async fn open(&self, path: &str) -> std::io::Result<DynSerial>;
}

/// Opens real serial ports through `tokio-serial`.
#[cfg(feature = "serial")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOpener;

#[cfg(feature = "serial")]
#[async_trait]
impl PortOpener for NativeOpener {
    async fn open(&self, path: &str) -> std::io::Result<DynSerial> {
        let path_owned = path.to_string();
        // Opening blocks on the OS call; keep it off the async workers.
        let port = tokio::task::spawn_blocking(move || open_serial_port(&path_owned))
            .await
            .map_err(std::io::Error::other)??;
        Ok(Box::new(port))
    }
}

/// Open a serial port with RX09 settings.
#[cfg(feature = "serial")]
fn open_serial_port(path: &str) -> std::io::Result<tokio_serial::SerialStream> {
    use tokio_serial::SerialPortBuilderExt;

    let port = tokio_serial::new(path, BAUD_RATE)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()?;

    tracing::info!(port = path, baud = BAUD_RATE, "Opened RX09 serial port");
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_shared_port_with_duplex() {
        let (mut host, device) = tokio::io::duplex(64);
        let port: SharedPort = wrap_shared(Box::new(device));

        port.lock().await.write_all(b"TXP,01,A\r").await.unwrap();

        let mut buf = [0u8; 9];
        host.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"TXP,01,A\r");
    }

    #[tokio::test]
    async fn test_shared_port_clone() {
        let (mut host, device) = tokio::io::duplex(64);
        let port: SharedPort = wrap_shared(Box::new(device));
        let port_clone = port.clone();

        port_clone.lock().await.write_all(b"abc").await.unwrap();

        let mut buf = [0u8; 3];
        host.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"abc");
        assert!(Arc::ptr_eq(&port, &port_clone));
    }

    #[cfg(feature = "serial")]
    #[tokio::test]
    async fn test_native_open_missing_device_fails() {
        let result = NativeOpener.open("/dev/rx09-does-not-exist").await;
        assert!(result.is_err());
    }
}
