//! # minitel-core
//!
//! Pure building blocks for driving Minitel videotex terminals: the character
//! codec, attribute diffs, cursor layout sequences, the command protocol, the
//! keyboard decoder and the Videotex page renderer.
//!
//! This crate performs no I/O.  It turns values into bytes and bytes into
//! values; `minitel-session` moves those bytes over a serial line or a socket.
//!
//! # Architecture overview (for beginners)
//!
//! A Minitel is a 1980s French terminal that talks 7-bit, even-parity serial
//! at 300 to 9600 baud.  Everything on screen is drawn by sending bytes:
//!
//! - **`charset`** – Maps Unicode characters to the terminal's ROM codes.  Two
//!   ROM revisions exist (VGP2 and VGP5) and they disagree on a few glyphs.
//!
//! - **`attributes`** – Colours, blinking, size and zone attributes.  The key
//!   operation is the *diff*: the shortest escape sequence taking the terminal
//!   from one attribute state to another.
//!
//! - **`layout`** – Cursor movement and editing sequences.
//!
//! - **`protocol`** – The `PRO1`/`PRO2`/`PRO3` command families, the replies
//!   they expect, and the terminal identity read at start-up.
//!
//! - **`keyboard`** – Splits incoming bytes into one frame per keystroke and
//!   names the key.
//!
//! - **`videotex`** – An off-screen page of 24x40 cells and the renderer that
//!   emits only the bytes needed to reproduce it.

pub mod attributes;
pub mod charset;
pub mod keyboard;
pub mod layout;
pub mod protocol;
pub mod videotex;

// Re-export the most-used types so callers can write `minitel_core::Key`.
pub use attributes::{Color, TextAttributes, ZoneAttributes};
pub use charset::VisualizationModule;
pub use keyboard::{FrameAssembler, FrameStatus, Key, KeyEvent};
pub use protocol::{
    Baudrate, Io, KeyboardMode, Module, ModuleStatus, OperatingState, ProtocolError,
    TerminalIdentity, VideoMode,
};
pub use videotex::{GridError, VideotexPage};
