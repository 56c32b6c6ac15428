//! Byte channels to a terminal.
//!
//! # Overview (for beginners)
//!
//! A [`Transport`] hides whether the terminal sits behind a serial line or a
//! TCP connection.  Both variants share the same shape:
//!
//! - **Writes are asynchronous.**  [`Transport::enqueue`] copies the bytes onto
//!   a FIFO and returns at once; a background writer thread (see [`writer`])
//!   performs the physical write, in enqueue order.
//! - **Reads are synchronous.**  [`Transport::read`] blocks until `n` bytes
//!   arrived or the timeout elapsed.  A timeout is not an error: the caller
//!   simply receives fewer bytes, possibly none.
//!
//! The session relies on that contract to run strictly half-duplex exchanges:
//! enqueue one command, then read the known reply length.

use std::time::Duration;

use crate::error::TransportError;

#[cfg(unix)]
pub mod serial;
pub mod simulated;
pub mod socket;
pub mod writer;

#[cfg(unix)]
pub use serial::{candidate_ports, SerialSettings, SerialTransport};
pub use simulated::{SimulatedTerminal, TerminalHandle};
pub use socket::SocketTransport;

/// Default blocking read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Duplex byte channel to one terminal.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Opens the channel and starts the writer thread.
    fn open(&mut self) -> Result<(), TransportError>;

    /// Stops and joins the writer, then releases the channel.  Idempotent.
    fn close(&mut self);

    /// Reads up to `n` bytes, waiting at most `timeout` (or the configured
    /// timeout when `None`).  Returns fewer bytes on timeout.
    fn read(&mut self, n: usize, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError>;

    /// Queues `data` for the writer thread.
    fn enqueue(&self, data: &[u8]) -> Result<(), TransportError>;

    fn set_timeout(&mut self, timeout: Duration);

    fn timeout(&self) -> Duration;

    /// Changes the local line speed: `output` for bytes we send, `input` for
    /// bytes we receive.  Pending output is discarded.
    fn set_baud(&mut self, _output: u32, _input: u32) -> Result<(), TransportError> {
        Err(TransportError::Unsupported("changing the line speed"))
    }

    /// Current output speed, or `None` when the channel has no line speed.
    fn baudrate(&self) -> Option<u32> {
        None
    }

    /// Discards queued output and any unread input.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Waits until every queued byte left the host.  Returns `false` on
    /// timeout.
    fn drain(&self, timeout: Duration) -> bool;
}
