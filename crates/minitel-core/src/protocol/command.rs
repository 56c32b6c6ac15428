//! Command builders and reply checking.
//!
//! Every exchange is described by a [`Request`]: the bytes to send, the prefix
//! the reply must start with and the total reply length.  The session sends
//! `command`, performs one blocking read of `reply_len` bytes and hands the
//! result to [`Request::check_reply`], which returns the payload that follows
//! the echoed prefix.
//!
//! Fire-and-forget commands (cursor visibility, modem connection, masking) are
//! plain byte constants.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::attributes::ESC;
use crate::charset::hex;
use crate::protocol::baudrate::{prog_byte, Baudrate};
use crate::protocol::error::ProtocolError;

// ── Prefixes and selectors ───────────────────────────────────────────────────

pub const PRO1: [u8; 2] = [ESC, 0x39];
pub const PRO2: [u8; 2] = [ESC, 0x3A];
pub const PRO3: [u8; 2] = [ESC, 0x3B];

pub const SEP: u8 = 0x13;
pub const SS2: u8 = 0x19;
pub const US: u8 = 0x1F;
pub const BEL: u8 = 0x07;
pub const SOH: u8 = 0x01;
pub const EOT: u8 = 0x04;

pub const START: u8 = 0x69;
pub const STOP: u8 = 0x6A;
pub const PROG: u8 = 0x6B;
pub const TO: u8 = 0x62;
pub const FROM: u8 = 0x63;
pub const ON: u8 = 0x61;
pub const OFF: u8 = 0x60;

pub const ROULEAU: u8 = 0x43;
pub const PCE: u8 = 0x44;
pub const MINUSCULE: u8 = 0x45;

const IDENTIFY: u8 = 0x7B;
const STATUS_OPERATING: u8 = 0x72;
const REPLY_OPERATING: u8 = 0x73;
const STATUS_PROTOCOL: u8 = 0x76;
const REPLY_PROTOCOL: u8 = 0x77;
const REPLY_PROG: u8 = 0x75;
const TRANSPARENCY: u8 = 0x66;
const REPLY_TRANSPARENCY: u8 = 0x57;
const VIDEO_MODE: u8 = 0x32;
const CURSOR_POSITION: u8 = 0x61;

/// Row and column bytes in a cursor position reply carry bit 6.
const POSITION_MASK: u8 = 63;

// ── Fire-and-forget commands ─────────────────────────────────────────────────

pub const SHOW_CURSOR: [u8; 1] = [0x11];
pub const HIDE_CURSOR: [u8; 1] = [0x14];
pub const BEEP: [u8; 1] = [BEL];
pub const CONNECT_MODEM: [u8; 3] = [ESC, 0x39, 0x68];
pub const DISCONNECT_MODEM: [u8; 3] = [ESC, 0x39, 0x67];
pub const MASK_FULL_SCREEN: [u8; 4] = [ESC, 0x23, 0x20, 0x58];
pub const UNMASK_FULL_SCREEN: [u8; 4] = [ESC, 0x23, 0x20, 0x5F];

// ── Modules ──────────────────────────────────────────────────────────────────

/// A terminal module that can be linked to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Screen,
    Keyboard,
    Modem,
    Connector,
}

/// Direction of a module port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Io {
    In,
    Out,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::Screen,
        Module::Keyboard,
        Module::Modem,
        Module::Connector,
    ];

    /// Wire code of this module's input or output port.
    pub fn code(self, io: Io) -> u8 {
        let out = match self {
            Module::Screen => 0x50,
            Module::Keyboard => 0x51,
            Module::Modem => 0x52,
            Module::Connector => 0x53,
        };
        match io {
            Io::Out => out,
            Io::In => out | 0x08,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Module::Screen => "screen",
            Module::Keyboard => "keyboard",
            Module::Modem => "modem",
            Module::Connector => "connector",
        };
        f.write_str(name)
    }
}

/// (receiver, transmitter) pairs the terminal refuses to link.
pub const DISALLOWED_SWITCHES: [(Module, Module); 5] = [
    (Module::Keyboard, Module::Connector),
    (Module::Keyboard, Module::Modem),
    (Module::Connector, Module::Screen),
    (Module::Modem, Module::Screen),
    (Module::Keyboard, Module::Screen),
];

pub fn is_switch_allowed(receiver: Module, transmitter: Module) -> bool {
    !DISALLOWED_SWITCHES.contains(&(receiver, transmitter))
}

// ── Modes ────────────────────────────────────────────────────────────────────

/// Screen standard: 40-column Videotex or 80-column mixed (Teletel/ASCII).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoMode {
    #[default]
    Videotex,
    Mixed,
}

/// Keyboard options negotiated during the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardMode {
    /// Extended keyboard: cursor keys send `ESC [` sequences.
    Extended,
    /// Cursor keys send C0 control codes.
    C0,
}

impl KeyboardMode {
    fn code(self) -> u8 {
        match self {
            KeyboardMode::Extended => 0x41,
            KeyboardMode::C0 => 0x43,
        }
    }
}

/// Operating-status flags that can be toggled with `PRO2 START/STOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenFlag {
    Scroll,
    Pce,
    Lowercase,
}

impl ScreenFlag {
    fn code(self) -> u8 {
        match self {
            ScreenFlag::Scroll => ROULEAU,
            ScreenFlag::Pce => PCE,
            ScreenFlag::Lowercase => MINUSCULE,
        }
    }
}

// ── Request / reply ──────────────────────────────────────────────────────────

/// One command and the shape of the reply it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: &'static str,
    pub command: Vec<u8>,
    pub reply_prefix: Vec<u8>,
    pub reply_len: usize,
}

impl Request {
    fn new(operation: &'static str, command: Vec<u8>, reply_prefix: Vec<u8>, reply_len: usize) -> Self {
        Self {
            operation,
            command,
            reply_prefix,
            reply_len,
        }
    }

    /// Checks length and echoed prefix, returning the bytes after the prefix.
    ///
    /// Mismatches are logged with the hex of what arrived.
    pub fn check_reply<'a>(&self, reply: &'a [u8]) -> Result<&'a [u8], ProtocolError> {
        if reply.len() < self.reply_len {
            error!(
                operation = self.operation,
                received = %hex(reply),
                "reply too short ({} of {} bytes)",
                reply.len(),
                self.reply_len
            );
            return Err(ProtocolError::ShortResponse {
                operation: self.operation,
                expected: self.reply_len,
                received: reply.len(),
            });
        }
        if !reply.starts_with(&self.reply_prefix) {
            error!(
                operation = self.operation,
                received = %hex(reply),
                "reply does not echo {}",
                hex(&self.reply_prefix)
            );
            return Err(ProtocolError::UnexpectedResponse {
                operation: self.operation,
                expected: hex(&self.reply_prefix),
                received: hex(reply),
            });
        }
        Ok(&reply[self.reply_prefix.len()..self.reply_len])
    }

    /// Like [`check_reply`](Self::check_reply) for replies ending in one
    /// status byte.
    pub fn check_status(&self, reply: &[u8]) -> Result<u8, ProtocolError> {
        let payload = self.check_reply(reply)?;
        payload
            .first()
            .copied()
            .ok_or_else(|| ProtocolError::ShortResponse {
                operation: self.operation,
                expected: self.reply_len,
                received: reply.len(),
            })
    }
}

fn join(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// ROM identification: `PRO1 0x7B`, reply `SOH manufacturer model firmware EOT`.
pub fn identify() -> Request {
    Request::new("identify", join(&[&PRO1, &[IDENTIFY]]), vec![SOH], 5)
}

pub fn operating_status() -> Request {
    Request::new(
        "operating status",
        join(&[&PRO1, &[STATUS_OPERATING]]),
        join(&[&PRO2, &[REPLY_OPERATING]]),
        4,
    )
}

/// Toggles a screen flag; the reply carries the new operating status.
pub fn screen_flag(flag: ScreenFlag, enable: bool) -> Request {
    let toggle = if enable { START } else { STOP };
    Request::new(
        "screen mode",
        join(&[&PRO2, &[toggle, flag.code()]]),
        join(&[&PRO2, &[REPLY_OPERATING]]),
        4,
    )
}

pub fn video_mode(mode: VideoMode) -> Request {
    let (selector, reply) = match mode {
        VideoMode::Mixed => (0x7D, 0x70),
        VideoMode::Videotex => (0x7E, 0x71),
    };
    Request::new(
        "video mode",
        join(&[&PRO2, &[VIDEO_MODE, selector]]),
        vec![SEP, reply],
        2,
    )
}

pub fn keyboard_status() -> Request {
    let keyboard_in = Module::Keyboard.code(Io::In);
    Request::new(
        "keyboard status",
        join(&[&PRO2, &[STATUS_OPERATING, keyboard_in]]),
        join(&[&PRO3, &[REPLY_OPERATING, keyboard_in]]),
        5,
    )
}

pub fn keyboard_mode(mode: KeyboardMode, enable: bool) -> Request {
    let keyboard_in = Module::Keyboard.code(Io::In);
    let toggle = if enable { START } else { STOP };
    Request::new(
        "keyboard mode",
        join(&[&PRO3, &[toggle, keyboard_in, mode.code()]]),
        join(&[&PRO3, &[REPLY_OPERATING, keyboard_in]]),
        5,
    )
}

/// Links (or unlinks) `transmitter`'s output to `receiver`'s input.
pub fn switch(receiver: Module, transmitter: Module, on: bool) -> Result<Request, ProtocolError> {
    if !is_switch_allowed(receiver, transmitter) {
        return Err(ProtocolError::DisallowedSwitch {
            receiver,
            transmitter,
        });
    }
    Ok(Request::new(
        "switch",
        join(&[
            &PRO3,
            &[
                if on { ON } else { OFF },
                receiver.code(Io::In),
                transmitter.code(Io::Out),
            ],
        ]),
        join(&[&PRO3, &[FROM, receiver.code(Io::Out)]]),
        5,
    ))
}

pub fn module_io_status(module: Module, io: Io) -> Request {
    Request::new(
        "module status",
        join(&[&PRO2, &[TO, module.code(io)]]),
        join(&[&PRO3, &[FROM, module.code(io)]]),
        5,
    )
}

pub fn protocol_status() -> Request {
    Request::new(
        "protocol status",
        join(&[&PRO1, &[STATUS_PROTOCOL]]),
        join(&[&PRO2, &[REPLY_PROTOCOL]]),
        4,
    )
}

/// Protocol transparency for the next `n` bytes, `n` in 1..=127.
pub fn transparency(n: u8) -> Result<Request, ProtocolError> {
    if !(1..=127).contains(&n) {
        return Err(ProtocolError::InvalidArgument(format!(
            "transparency length must be within 1..=127, got {n}"
        )));
    }
    Ok(Request::new(
        "transparency",
        join(&[&PRO2, &[TRANSPARENCY, n | 0x80]]),
        vec![SEP, REPLY_TRANSPARENCY],
        2,
    ))
}

pub fn connector_baudrate(emit: Baudrate, receive: Baudrate) -> Request {
    Request::new(
        "connector baud rate",
        join(&[&PRO2, &[PROG, prog_byte(emit, receive)]]),
        join(&[&PRO2, &[REPLY_PROG]]),
        4,
    )
}

pub fn cursor_position() -> Request {
    Request::new("cursor position", vec![ESC, CURSOR_POSITION], vec![US], 3)
}

/// Decodes the `(row, column)` payload of a cursor position reply.
pub fn parse_cursor_position(payload: &[u8]) -> Option<(u8, u8)> {
    match payload {
        [row, col, ..] => Some((row & POSITION_MASK, col & POSITION_MASK)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_codes() {
        assert_eq!(Module::Screen.code(Io::Out), 0x50);
        assert_eq!(Module::Screen.code(Io::In), 0x58);
        assert_eq!(Module::Keyboard.code(Io::In), 0x59);
        assert_eq!(Module::Modem.code(Io::Out), 0x52);
        assert_eq!(Module::Connector.code(Io::In), 0x5B);
    }

    #[test]
    fn test_switch_builds_pro3_command() {
        let req = switch(Module::Screen, Module::Modem, false).unwrap();
        assert_eq!(req.command, vec![ESC, 0x3B, OFF, 0x58, 0x52]);
        assert_eq!(req.reply_prefix, vec![ESC, 0x3B, FROM, 0x50]);
        assert_eq!(req.reply_len, 5);
    }

    #[test]
    fn test_switch_rejects_disallowed_pair() {
        assert_eq!(
            switch(Module::Keyboard, Module::Screen, true),
            Err(ProtocolError::DisallowedSwitch {
                receiver: Module::Keyboard,
                transmitter: Module::Screen,
            })
        );
    }

    #[test]
    fn test_block_same_module_is_allowed() {
        for module in Module::ALL {
            assert!(is_switch_allowed(module, module));
        }
    }

    #[test]
    fn test_check_status_returns_trailing_byte() {
        // Arrange
        let req = operating_status();
        let reply = [ESC, 0x3A, 0x73, 0x42];

        // Act
        let status = req.check_status(&reply);

        // Assert
        assert_eq!(status, Ok(0x42));
    }

    #[test]
    fn test_check_reply_reports_short_reply() {
        let req = keyboard_status();
        assert_eq!(
            req.check_reply(&[]),
            Err(ProtocolError::ShortResponse {
                operation: "keyboard status",
                expected: 5,
                received: 0,
            })
        );
    }

    #[test]
    fn test_check_reply_reports_wrong_echo() {
        let req = protocol_status();
        let err = req.check_reply(&[ESC, 0x3A, 0x73, 0x40]).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_transparency_bounds() {
        assert!(transparency(0).is_err());
        assert!(transparency(128).is_err());
        assert_eq!(transparency(5).unwrap().command, vec![ESC, 0x3A, 0x66, 0x85]);
    }

    #[test]
    fn test_video_mode_commands() {
        assert_eq!(video_mode(VideoMode::Mixed).command, vec![ESC, 0x3A, 0x32, 0x7D]);
        assert_eq!(video_mode(VideoMode::Videotex).reply_prefix, vec![SEP, 0x71]);
    }

    #[test]
    fn test_keyboard_mode_command() {
        let req = keyboard_mode(KeyboardMode::Extended, true);
        assert_eq!(req.command, vec![ESC, 0x3B, START, 0x59, 0x41]);
        let req = keyboard_mode(KeyboardMode::C0, false);
        assert_eq!(req.command, vec![ESC, 0x3B, STOP, 0x59, 0x43]);
    }

    #[test]
    fn test_parse_cursor_position_masks_bit_six() {
        assert_eq!(parse_cursor_position(&[0x4C, 0x45]), Some((12, 5)));
        assert_eq!(parse_cursor_position(&[0x41]), None);
    }
}
