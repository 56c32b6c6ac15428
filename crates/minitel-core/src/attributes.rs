//! Character and zone attributes, and the escape sequences that switch between them.
//!
//! A Minitel keeps two kinds of attribute state:
//!
//! - [`TextAttributes`] apply to each following character (foreground colour,
//!   blinking, inversion, double height/width).
//! - [`ZoneAttributes`] apply to a run of cells and are declared by an escape
//!   followed by a delimiter byte that occupies one cell (background colour,
//!   masking, highlight).
//!
//! Moving the terminal from one state to another is a pure function of the two
//! states: [`TextAttributes::diff`] and [`ZoneAttributes::diff`] emit one
//! escape per field that differs, and nothing for equal fields.  Both the live
//! session setters and the Videotex renderer use these functions.

use serde::{Deserialize, Serialize};

/// Escape: every attribute byte is prefixed with it.
pub const ESC: u8 = 0x1B;
/// Space that closes a zone declaration and occupies its cell.
pub const DELIMITER: u8 = 0x20;

pub const BLINKING: u8 = 0x48;
pub const FIXED: u8 = 0x49;
pub const NORMAL_SIZE: u8 = 0x4C;
pub const DOUBLE_HEIGHT: u8 = 0x4D;
pub const DOUBLE_WIDTH: u8 = 0x4E;
pub const DOUBLE_SIZE: u8 = 0x4F;
pub const START_INVERT: u8 = 0x5D;
pub const STOP_INVERT: u8 = 0x5C;

pub const MASKING: u8 = 0x58;
pub const UNMASKING: u8 = 0x5F;
pub const START_HIGHLIGHT: u8 = 0x5A;
pub const END_HIGHLIGHT: u8 = 0x59;

/// The eight Minitel colours, in palette order.
///
/// On monochrome terminals they render as grey levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    #[default]
    White = 7,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Attribute byte selecting this colour as the character colour.
    pub fn foreground_code(self) -> u8 {
        0x40 | self as u8
    }

    /// Attribute byte selecting this colour as the zone background.
    pub fn background_code(self) -> u8 {
        0x50 | self as u8
    }
}

/// Per-character attributes.  The default is white, fixed, normal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextAttributes {
    pub color: Color,
    pub blinking: bool,
    pub inverted: bool,
    pub double_height: bool,
    pub double_width: bool,
}

impl TextAttributes {
    /// Size selector byte for the given height/width flags.
    pub fn size_code(double_height: bool, double_width: bool) -> u8 {
        match (double_height, double_width) {
            (false, false) => NORMAL_SIZE,
            (true, false) => DOUBLE_HEIGHT,
            (false, true) => DOUBLE_WIDTH,
            (true, true) => DOUBLE_SIZE,
        }
    }

    /// Escape sequence moving the terminal from `self` to `target`.
    ///
    /// Height and width share one selector, so a change in either emits a
    /// single size escape for the target combination.
    pub fn diff(&self, target: &TextAttributes) -> Vec<u8> {
        let mut out = Vec::new();
        self.diff_into(target, &mut out);
        out
    }

    /// Like [`diff`](Self::diff) but appends to `out`.
    pub fn diff_into(&self, target: &TextAttributes, out: &mut Vec<u8>) {
        if self.color != target.color {
            out.extend_from_slice(&[ESC, target.color.foreground_code()]);
        }
        if self.blinking != target.blinking {
            out.extend_from_slice(&[ESC, if target.blinking { BLINKING } else { FIXED }]);
        }
        if self.inverted != target.inverted {
            out.extend_from_slice(&[ESC, if target.inverted { START_INVERT } else { STOP_INVERT }]);
        }
        if self.double_height != target.double_height || self.double_width != target.double_width {
            out.extend_from_slice(&[
                ESC,
                Self::size_code(target.double_height, target.double_width),
            ]);
        }
    }

    /// Full escape sequence forcing every field to its default value.
    pub fn reset_sequence() -> Vec<u8> {
        vec![
            ESC,
            Color::White.foreground_code(),
            ESC,
            FIXED,
            ESC,
            STOP_INVERT,
            ESC,
            NORMAL_SIZE,
        ]
    }
}

/// Per-zone attributes.  The default is a black, unmasked, unhighlighted zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneAttributes {
    pub background: Color,
    pub masking: bool,
    pub highlight: bool,
}

impl Default for ZoneAttributes {
    fn default() -> Self {
        Self {
            background: Color::Black,
            masking: false,
            highlight: false,
        }
    }
}

impl ZoneAttributes {
    /// Escape sequence moving the terminal from `self` to `target`.
    ///
    /// A non-empty result ends with [`DELIMITER`]; equal states yield nothing.
    pub fn diff(&self, target: &ZoneAttributes) -> Vec<u8> {
        let mut out = Vec::new();
        self.diff_into(target, &mut out);
        out
    }

    /// Like [`diff`](Self::diff) but appends to `out`.
    pub fn diff_into(&self, target: &ZoneAttributes, out: &mut Vec<u8>) {
        let start = out.len();
        if self.background != target.background {
            out.extend_from_slice(&[ESC, target.background.background_code()]);
        }
        if self.masking != target.masking {
            out.extend_from_slice(&[ESC, if target.masking { MASKING } else { UNMASKING }]);
        }
        if self.highlight != target.highlight {
            out.extend_from_slice(&[
                ESC,
                if target.highlight { START_HIGHLIGHT } else { END_HIGHLIGHT },
            ]);
        }
        if out.len() > start {
            out.push(DELIMITER);
        }
    }

    /// Returns `true` when every field has its default value.
    pub fn is_default(&self) -> bool {
        *self == ZoneAttributes::default()
    }

    /// Full declaration forcing every field to its default value.
    pub fn reset_sequence() -> Vec<u8> {
        vec![
            ESC,
            Color::Black.background_code(),
            ESC,
            UNMASKING,
            ESC,
            END_HIGHLIGHT,
            DELIMITER,
        ]
    }
}
