//! TCP transport for terminals bridged to the network.
//!
//! The connection is accepted elsewhere (the server's accept loop); this type
//! only wraps the stream.  One `read(2)` may return fewer bytes than asked, so
//! [`SocketTransport::read`] keeps reading until the count is met or the
//! deadline passes.  A zero-length read means the peer closed the connection
//! and is reported as [`TransportError::Disconnected`].

use std::io::{self, Read};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::writer::{write_resumable, Sink, Writer};
use super::{Transport, DEFAULT_TIMEOUT};
use crate::error::TransportError;

/// A stalled peer makes the writer retry the item after this long.
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

struct SocketSink {
    stream: TcpStream,
    offset: usize,
}

impl Sink for SocketSink {
    fn write_item(&mut self, data: &[u8]) -> io::Result<()> {
        write_resumable(&mut self.stream, data, &mut self.offset)
    }
}

/// Transport over one accepted TCP connection.
pub struct SocketTransport {
    stream: TcpStream,
    peer: Option<SocketAddr>,
    writer: Option<Writer>,
    timeout: Duration,
}

impl SocketTransport {
    pub fn new(stream: TcpStream) -> Self {
        let peer = stream.peer_addr().ok();
        Self {
            stream,
            peer,
            writer: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    fn target(&self) -> String {
        self.peer
            .map(|p| p.to_string())
            .unwrap_or_else(|| "socket".to_string())
    }

    fn writer(&self) -> Result<&Writer, TransportError> {
        self.writer.as_ref().ok_or(TransportError::Stopped)
    }

    /// Reads and drops whatever input is already buffered.
    fn discard_input(&mut self) -> io::Result<()> {
        self.stream.set_nonblocking(true)?;
        let mut scratch = [0u8; 256];
        let result = loop {
            match self.stream.read(&mut scratch) {
                Ok(0) => break Ok(()),
                Ok(n) => trace!("discarded {n} input bytes"),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };
        self.stream.set_nonblocking(false)?;
        result
    }
}

impl Transport for SocketTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.writer.is_some() {
            return Ok(());
        }
        let open_error = |source| TransportError::Open {
            target: self.target(),
            source,
        };
        self.stream.set_nodelay(true).map_err(open_error)?;
        let write_half = self.stream.try_clone().map_err(open_error)?;
        write_half
            .set_write_timeout(Some(WRITE_TIMEOUT))
            .map_err(open_error)?;

        let sink = SocketSink {
            stream: write_half,
            offset: 0,
        };
        self.writer = Some(Writer::spawn("minitel-socket-writer", sink)?);
        info!(peer = %self.target(), "socket transport opened");
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            writer.shutdown();
            // The peer may already be gone; nothing left to report.
            let _ = self.stream.shutdown(Shutdown::Both);
            debug!(peer = %self.target(), "socket transport closed");
        }
    }

    fn read(&mut self, n: usize, timeout: Option<Duration>) -> Result<Vec<u8>, TransportError> {
        let deadline = Instant::now() + timeout.unwrap_or(self.timeout);
        let mut buf = vec![0u8; n];
        let mut filled = 0;
        while filled < n {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.stream.set_read_timeout(Some(remaining))?;
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => {
                    info!(peer = %self.target(), "peer closed the connection");
                    return Err(TransportError::Disconnected);
                }
                Ok(got) => filled += got,
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    break
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }

    fn enqueue(&self, data: &[u8]) -> Result<(), TransportError> {
        self.writer()?.queue().push(data.to_vec())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer()?.queue().clear();
        self.discard_input()?;
        Ok(())
    }

    fn drain(&self, timeout: Duration) -> bool {
        match self.writer() {
            Ok(writer) => writer.queue().wait_idle(timeout),
            Err(_) => true,
        }
    }
}

impl Drop for SocketTransport {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;

    fn pair() -> (SocketTransport, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server, _) = listener.accept().unwrap();
        (SocketTransport::new(server), client)
    }

    #[test]
    fn test_read_gathers_split_writes() {
        // Arrange
        let (mut transport, mut client) = pair();
        transport.open().unwrap();

        // Act: the reply arrives in two segments
        let writer = std::thread::spawn(move || {
            client.write_all(&[0x01, b'C']).unwrap();
            std::thread::sleep(Duration::from_millis(50));
            client.write_all(&[b'v', b';', 0x04]).unwrap();
            client
        });
        let got = transport.read(5, Some(Duration::from_secs(2))).unwrap();
        let _client = writer.join().unwrap();

        // Assert
        assert_eq!(got, vec![0x01, b'C', b'v', b';', 0x04]);
    }

    #[test]
    fn test_read_timeout_returns_partial_bytes() {
        let (mut transport, mut client) = pair();
        transport.open().unwrap();
        client.write_all(&[0x41]).unwrap();

        let got = transport.read(3, Some(Duration::from_millis(100))).unwrap();

        assert_eq!(got, vec![0x41]);
    }

    #[test]
    fn test_peer_close_is_disconnect_not_timeout() {
        let (mut transport, client) = pair();
        transport.open().unwrap();
        drop(client);

        let result = transport.read(1, Some(Duration::from_secs(1)));

        assert!(matches!(result, Err(TransportError::Disconnected)));
    }

    #[test]
    fn test_enqueued_bytes_reach_peer_in_order() {
        let (mut transport, mut client) = pair();
        transport.open().unwrap();

        transport.enqueue(b"ab").unwrap();
        transport.enqueue(b"cd").unwrap();
        assert!(transport.drain(Duration::from_secs(2)));

        let mut buf = [0u8; 4];
        client.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn test_set_baud_is_unsupported() {
        let (mut transport, _client) = pair();
        assert_eq!(transport.baudrate(), None);
        assert!(matches!(
            transport.set_baud(4800, 4800),
            Err(TransportError::Unsupported(_))
        ));
    }

    #[test]
    fn test_enqueue_before_open_fails() {
        let (transport, _client) = pair();
        assert!(matches!(transport.enqueue(b"x"), Err(TransportError::Stopped)));
    }
}
