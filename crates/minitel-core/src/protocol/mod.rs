//! Terminal command protocol: prefixes, request builders, reply decoding and
//! terminal identification.

pub mod baudrate;
pub mod command;
pub mod error;
pub mod identity;
pub mod status;

pub use baudrate::{parse_prog_status, prog_byte, Baudrate};
pub use command::{
    is_switch_allowed, Io, KeyboardMode, Module, Request, ScreenFlag, VideoMode,
    DISALLOWED_SWITCHES,
};
pub use error::ProtocolError;
pub use identity::{Manufacturer, Model, TerminalIdentity};
pub use status::{KeyboardStatus, ModuleStatus, OperatingState, OperatingStatus, ProtocolStatus};
