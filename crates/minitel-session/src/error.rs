//! Error types for transports and sessions.

use minitel_core::ProtocolError;
use thiserror::Error;

/// Failures of the byte channel itself.
///
/// A read timeout is not an error: [`crate::Transport::read`] returns an empty
/// buffer instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The device or connection could not be opened.
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error on an open channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection.
    #[error("peer disconnected")]
    Disconnected,

    /// Bytes were enqueued after the writer stopped, or before `open`.
    #[error("transport is not running")]
    Stopped,

    /// The operation makes no sense for this kind of transport.
    #[error("{0} is not supported by this transport")]
    Unsupported(&'static str),
}

/// Failures of a protocol session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A handshake step failed; the session was never usable.
    #[error("cannot initialize the terminal during {step}: {source}")]
    CannotInitialize {
        step: &'static str,
        #[source]
        source: Box<SessionError>,
    },

    /// The terminal did not answer at the new rate; the old rate was restored
    /// and the terminal answers again.
    #[error("terminal did not answer at the new rate, restored {restored} bauds")]
    BaudrateRejected { restored: u32 },

    /// Neither the new rate nor the restored one got an answer.
    #[error("terminal lost after changing rate, rollback to {previous} bauds failed")]
    BaudrateRollbackFailed { previous: u32 },
}

impl SessionError {
    pub(crate) fn during(step: &'static str) -> impl FnOnce(SessionError) -> SessionError {
        move |source| SessionError::CannotInitialize {
            step,
            source: Box::new(source),
        }
    }
}
