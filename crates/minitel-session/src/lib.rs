//! # minitel-session
//!
//! Blocking I/O around the pure `minitel-core` crate: transports with a
//! background writer thread, the protocol session that runs the handshake and
//! the terminal commands, and the keyboard binding table.
//!
//! ```no_run
//! use minitel_session::{Minitel, SessionConfig, SocketTransport};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = std::net::TcpListener::bind("0.0.0.0:3615")?;
//! let (stream, _) = listener.accept()?;
//! let mut minitel = Minitel::connect(SocketTransport::new(stream), SessionConfig::default())?;
//! minitel.clear()?;
//! minitel.print("Bonjour !")?;
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod error;
pub mod session;
pub mod transport;

pub use bindings::{BindingTable, Dispatched, Filter};
pub use error::{SessionError, TransportError};
pub use session::{Minitel, SessionConfig};
#[cfg(unix)]
pub use transport::{SerialSettings, SerialTransport};
pub use transport::{SimulatedTerminal, SocketTransport, TerminalHandle, Transport};
