//! Keystroke frame assembly.
//!
//! Keyboard frames carry no length field; the length follows from the first
//! bytes:
//!
//! | First byte | Second byte      | Third byte   | Length |
//! |------------|------------------|--------------|--------|
//! | `SEP`      | any              |              | 2      |
//! | `SS2`      | `0x4B` (cedilla) | any          | 3      |
//! | `SS2`      | other            |              | 2      |
//! | `ESC`      | `[`              | `2` or `4`   | 4      |
//! | `ESC`      | `[`              | other        | 3      |
//! | `ESC`      | other            |              | 2      |
//! | other      |                  |              | 1      |
//!
//! [`FrameAssembler`] is fed one byte at a time and reports when the frame is
//! complete, so a reader never asks the line for bytes that belong to the next
//! keystroke.

use crate::attributes::ESC;
use crate::charset::tables::ACCENT_CEDILLA;
use crate::protocol::command::{SEP, SS2};

const CSI_MARKER: u8 = 0x5B;
/// `ESC [ 2 J` and `ESC [ 4 h` / `ESC [ 4 l` carry one more byte.
const CSI_LONG: [u8; 2] = [0x32, 0x34];
const MAX_FRAME: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    NeedMore,
    Complete,
}

#[derive(Debug, Default, Clone)]
pub struct FrameAssembler {
    buf: Vec<u8>,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(MAX_FRAME),
        }
    }

    /// Appends one byte and reports whether the frame is now complete.
    pub fn push(&mut self, byte: u8) -> FrameStatus {
        self.buf.push(byte);
        if Self::expected_len(&self.buf) <= self.buf.len() {
            FrameStatus::Complete
        } else {
            FrameStatus::NeedMore
        }
    }

    /// Returns the bytes gathered so far and resets the assembler.  Also used
    /// to flush a partial frame after a timeout.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Frame length implied by the bytes seen so far.
    pub fn expected_len(prefix: &[u8]) -> usize {
        match prefix {
            [] => 1,
            [SEP, ..] => 2,
            [SS2, ACCENT_CEDILLA, ..] => 3,
            [SS2, ..] => 2,
            [ESC, CSI_MARKER, third, ..] if CSI_LONG.contains(third) => 4,
            [ESC, CSI_MARKER, ..] => 3,
            [ESC, ..] => 2,
            [_, ..] => 1,
        }
    }
}

/// Splits a byte stream into complete frames, plus any trailing partial frame.
pub fn split_frames(data: &[u8]) -> (Vec<Vec<u8>>, Vec<u8>) {
    let mut assembler = FrameAssembler::new();
    let mut frames = Vec::new();
    for &byte in data {
        if assembler.push(byte) == FrameStatus::Complete {
            frames.push(assembler.take());
        }
    }
    (frames, assembler.take())
}
