//! Errors raised while building commands or checking terminal replies.

use thiserror::Error;

use crate::protocol::baudrate::Baudrate;
use crate::protocol::command::Module;

/// Protocol-level failure.  Never fatal on its own: the caller decides whether
/// the operation was essential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The reply did not echo the expected prefix/selector.
    #[error("unexpected reply to {operation}: expected {expected}, got {received}")]
    UnexpectedResponse {
        operation: &'static str,
        expected: String,
        received: String,
    },

    /// Fewer bytes than the reply length arrived before the read timed out.
    #[error("short reply to {operation}: expected {expected} bytes, got {received}")]
    ShortResponse {
        operation: &'static str,
        expected: usize,
        received: usize,
    },

    /// The terminal cannot route `transmitter` output into `receiver`.
    #[error("switching {transmitter} -> {receiver} is not possible")]
    DisallowedSwitch { receiver: Module, transmitter: Module },

    /// This model needs the same emission and reception rates.
    #[error("emission ({emit}) and reception ({receive}) rates must match on this terminal")]
    AsymmetricBaudrate { emit: Baudrate, receive: Baudrate },

    /// A speed code or bit rate with no Minitel equivalent.
    #[error("unknown baud rate {0}")]
    UnknownBaudrate(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
