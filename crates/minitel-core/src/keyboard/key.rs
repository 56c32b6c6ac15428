//! Logical keys and the raw frames that produce them.
//!
//! A key frame is one to four bytes.  Function keys arrive as `SEP` + letter,
//! cursor keys (extended keyboard) as `ESC [` sequences, accented and symbol
//! keys as `SS2` + code.  Everything else is a single byte.

/// The nine Minitel function keys (`SEP` + letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    Send,
    Previous,
    Repeat,
    Guide,
    Cancel,
    Summary,
    Correction,
    Next,
    ConnectionSwitch,
}

impl FunctionKey {
    pub const ALL: [FunctionKey; 9] = [
        FunctionKey::Send,
        FunctionKey::Previous,
        FunctionKey::Repeat,
        FunctionKey::Guide,
        FunctionKey::Cancel,
        FunctionKey::Summary,
        FunctionKey::Correction,
        FunctionKey::Next,
        FunctionKey::ConnectionSwitch,
    ];

    pub fn frame(self) -> &'static [u8] {
        match self {
            FunctionKey::Send => b"\x13\x41",
            FunctionKey::Previous => b"\x13\x42",
            FunctionKey::Repeat => b"\x13\x43",
            FunctionKey::Guide => b"\x13\x44",
            FunctionKey::Cancel => b"\x13\x45",
            FunctionKey::Summary => b"\x13\x46",
            FunctionKey::Correction => b"\x13\x47",
            FunctionKey::Next => b"\x13\x48",
            FunctionKey::ConnectionSwitch => b"\x13\x49",
        }
    }

    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.frame() == frame)
    }
}

/// Cursor and editing keys.  The `ESC [` forms are only sent once the
/// keyboard is in extended mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKey {
    Up,
    Down,
    Right,
    Left,
    /// Shift + Up.
    DeleteLine,
    /// Shift + Down.
    InsertLine,
    /// Shift + Right, first press.
    StartInsert,
    /// Shift + Right, second press.
    StopInsert,
    /// Shift + Left.
    DeleteChar,
    /// Shift + Enter.
    Home,
    /// Ctrl + Enter.
    ClearPage,
    Enter,
    /// Ctrl + Left (`DEL`).
    CtrlLeft,
}

impl CursorKey {
    pub const ALL: [CursorKey; 13] = [
        CursorKey::Up,
        CursorKey::Down,
        CursorKey::Right,
        CursorKey::Left,
        CursorKey::DeleteLine,
        CursorKey::InsertLine,
        CursorKey::StartInsert,
        CursorKey::StopInsert,
        CursorKey::DeleteChar,
        CursorKey::Home,
        CursorKey::ClearPage,
        CursorKey::Enter,
        CursorKey::CtrlLeft,
    ];

    pub fn frame(self) -> &'static [u8] {
        match self {
            CursorKey::Up => b"\x1b\x5b\x41",
            CursorKey::Down => b"\x1b\x5b\x42",
            CursorKey::Right => b"\x1b\x5b\x43",
            CursorKey::Left => b"\x1b\x5b\x44",
            CursorKey::DeleteLine => b"\x1b\x5b\x4d",
            CursorKey::InsertLine => b"\x1b\x5b\x4c",
            CursorKey::StartInsert => b"\x1b\x5b\x34\x68",
            CursorKey::StopInsert => b"\x1b\x5b\x34\x6c",
            CursorKey::DeleteChar => b"\x1b\x5b\x50",
            CursorKey::Home => b"\x1b\x5b\x48",
            CursorKey::ClearPage => b"\x1b\x5b\x32\x4a",
            CursorKey::Enter => b"\x0d",
            CursorKey::CtrlLeft => b"\x7f",
        }
    }

    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.frame() == frame)
    }
}

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Function(FunctionKey),
    Cursor(CursorKey),
    Videotex(VideotexKey),
}

impl Key {
    /// Maps a complete frame to its key, if the frame is known.
    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        if let Some(k) = FunctionKey::from_frame(frame) {
            return Some(Key::Function(k));
        }
        if let Some(k) = CursorKey::from_frame(frame) {
            return Some(Key::Cursor(k));
        }
        VideotexKey::from_frame(frame).map(Key::Videotex)
    }

    pub fn frame(self) -> &'static [u8] {
        match self {
            Key::Function(k) => k.frame(),
            Key::Cursor(k) => k.frame(),
            Key::Videotex(k) => k.frame(),
        }
    }

    /// Printable projection: the character typed, or `None` for function,
    /// cursor and control keys.
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Videotex(k) => k.printable(),
            Key::Function(_) | Key::Cursor(_) => None,
        }
    }
}

// ── Videotex keys ────────────────────────────────────────────────────────────

/// Keys producing Videotex characters or control codes, named after the
/// physical chord that produces them (`Shift`, `Ctrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideotexKey {
    CtrlApostrophe,
    CtrlA,
    CtrlB,
    CtrlC,
    CtrlD,
    CtrlE,
    CtrlF,
    CtrlG,
    CtrlH,
    CtrlI,
    CtrlJ,
    CtrlK,
    CtrlL,
    CtrlN,
    CtrlO,
    CtrlP,
    CtrlQ,
    CtrlR,
    CtrlS,
    CtrlT,
    CtrlU,
    CtrlV,
    CtrlW,
    CtrlX,
    CtrlY,
    CtrlZ,
    Esc,
    CtrlComma,
    CtrlMinus,
    CtrlFullStop,
    CtrlQuestionMark,
    Space,
    Shift1,
    Shift2,
    Hash,
    Shift4,
    Shift5,
    Shift6,
    Apostrophe,
    Shift8,
    Shift9,
    Star,
    ShiftSemicolon,
    Comma,
    Minus,
    FullStop,
    ShiftQuestionMark,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Colon,
    Semicolon,
    ShiftComma,
    ShiftMinus,
    ShiftFullStop,
    QuestionMark,
    ShiftApostrophe,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    ShiftStar,
    ShiftCancel,
    ShiftHash,
    Shift0,
    Ctrl6,
    Ctrl5,
    LowerA,
    LowerB,
    LowerC,
    LowerD,
    LowerE,
    LowerF,
    LowerG,
    LowerH,
    LowerI,
    LowerJ,
    LowerK,
    LowerL,
    LowerM,
    LowerN,
    LowerO,
    LowerP,
    LowerQ,
    LowerR,
    LowerS,
    LowerT,
    LowerU,
    LowerV,
    LowerW,
    LowerX,
    LowerY,
    LowerZ,
    Ctrl1,
    Ctrl2,
    Ctrl3,
    Ctrl4,
    CtrlCancel,
    ShiftCorrection,
    Ctrl8,
    Ctrl9,
    CtrlHash,
    Ctrl0,
    CtrlStar,
    Ctrl7,
    ShiftNext,
    ShiftPrevious,
    ShiftSummary,
    ShiftGuide,
    CtrlCorrection,
    CtrlReturn,
    CtrlRepeat,
    CtrlNext,
}

impl VideotexKey {
    /// Every key, in frame order.
    pub const ALL: [VideotexKey; 142] = [
        VideotexKey::CtrlApostrophe,
        VideotexKey::CtrlA,
        VideotexKey::CtrlB,
        VideotexKey::CtrlC,
        VideotexKey::CtrlD,
        VideotexKey::CtrlE,
        VideotexKey::CtrlF,
        VideotexKey::CtrlG,
        VideotexKey::CtrlH,
        VideotexKey::CtrlI,
        VideotexKey::CtrlJ,
        VideotexKey::CtrlK,
        VideotexKey::CtrlL,
        VideotexKey::CtrlN,
        VideotexKey::CtrlO,
        VideotexKey::CtrlP,
        VideotexKey::CtrlQ,
        VideotexKey::CtrlR,
        VideotexKey::CtrlS,
        VideotexKey::CtrlT,
        VideotexKey::CtrlU,
        VideotexKey::CtrlV,
        VideotexKey::CtrlW,
        VideotexKey::CtrlX,
        VideotexKey::CtrlY,
        VideotexKey::CtrlZ,
        VideotexKey::Esc,
        VideotexKey::CtrlComma,
        VideotexKey::CtrlMinus,
        VideotexKey::CtrlFullStop,
        VideotexKey::CtrlQuestionMark,
        VideotexKey::Space,
        VideotexKey::Shift1,
        VideotexKey::Shift2,
        VideotexKey::Hash,
        VideotexKey::Shift4,
        VideotexKey::Shift5,
        VideotexKey::Shift6,
        VideotexKey::Apostrophe,
        VideotexKey::Shift8,
        VideotexKey::Shift9,
        VideotexKey::Star,
        VideotexKey::ShiftSemicolon,
        VideotexKey::Comma,
        VideotexKey::Minus,
        VideotexKey::FullStop,
        VideotexKey::ShiftQuestionMark,
        VideotexKey::Digit0,
        VideotexKey::Digit1,
        VideotexKey::Digit2,
        VideotexKey::Digit3,
        VideotexKey::Digit4,
        VideotexKey::Digit5,
        VideotexKey::Digit6,
        VideotexKey::Digit7,
        VideotexKey::Digit8,
        VideotexKey::Digit9,
        VideotexKey::Colon,
        VideotexKey::Semicolon,
        VideotexKey::ShiftComma,
        VideotexKey::ShiftMinus,
        VideotexKey::ShiftFullStop,
        VideotexKey::QuestionMark,
        VideotexKey::ShiftApostrophe,
        VideotexKey::A,
        VideotexKey::B,
        VideotexKey::C,
        VideotexKey::D,
        VideotexKey::E,
        VideotexKey::F,
        VideotexKey::G,
        VideotexKey::H,
        VideotexKey::I,
        VideotexKey::J,
        VideotexKey::K,
        VideotexKey::L,
        VideotexKey::M,
        VideotexKey::N,
        VideotexKey::O,
        VideotexKey::P,
        VideotexKey::Q,
        VideotexKey::R,
        VideotexKey::S,
        VideotexKey::T,
        VideotexKey::U,
        VideotexKey::V,
        VideotexKey::W,
        VideotexKey::X,
        VideotexKey::Y,
        VideotexKey::Z,
        VideotexKey::ShiftStar,
        VideotexKey::ShiftCancel,
        VideotexKey::ShiftHash,
        VideotexKey::Shift0,
        VideotexKey::Ctrl6,
        VideotexKey::Ctrl5,
        VideotexKey::LowerA,
        VideotexKey::LowerB,
        VideotexKey::LowerC,
        VideotexKey::LowerD,
        VideotexKey::LowerE,
        VideotexKey::LowerF,
        VideotexKey::LowerG,
        VideotexKey::LowerH,
        VideotexKey::LowerI,
        VideotexKey::LowerJ,
        VideotexKey::LowerK,
        VideotexKey::LowerL,
        VideotexKey::LowerM,
        VideotexKey::LowerN,
        VideotexKey::LowerO,
        VideotexKey::LowerP,
        VideotexKey::LowerQ,
        VideotexKey::LowerR,
        VideotexKey::LowerS,
        VideotexKey::LowerT,
        VideotexKey::LowerU,
        VideotexKey::LowerV,
        VideotexKey::LowerW,
        VideotexKey::LowerX,
        VideotexKey::LowerY,
        VideotexKey::LowerZ,
        VideotexKey::Ctrl1,
        VideotexKey::Ctrl2,
        VideotexKey::Ctrl3,
        VideotexKey::Ctrl4,
        VideotexKey::CtrlCancel,
        VideotexKey::ShiftCorrection,
        VideotexKey::Ctrl8,
        VideotexKey::Ctrl9,
        VideotexKey::CtrlHash,
        VideotexKey::Ctrl0,
        VideotexKey::CtrlStar,
        VideotexKey::Ctrl7,
        VideotexKey::ShiftNext,
        VideotexKey::ShiftPrevious,
        VideotexKey::ShiftSummary,
        VideotexKey::ShiftGuide,
        VideotexKey::CtrlCorrection,
        VideotexKey::CtrlReturn,
        VideotexKey::CtrlRepeat,
        VideotexKey::CtrlNext,
    ];

    pub fn frame(self) -> &'static [u8] {
        match self {
            VideotexKey::CtrlApostrophe => b"\x00",
            VideotexKey::CtrlA => b"\x01",
            VideotexKey::CtrlB => b"\x02",
            VideotexKey::CtrlC => b"\x03",
            VideotexKey::CtrlD => b"\x04",
            VideotexKey::CtrlE => b"\x05",
            VideotexKey::CtrlF => b"\x06",
            VideotexKey::CtrlG => b"\x07",
            VideotexKey::CtrlH => b"\x08",
            VideotexKey::CtrlI => b"\x09",
            VideotexKey::CtrlJ => b"\x0a",
            VideotexKey::CtrlK => b"\x0b",
            VideotexKey::CtrlL => b"\x0c",
            VideotexKey::CtrlN => b"\x0e",
            VideotexKey::CtrlO => b"\x0f",
            VideotexKey::CtrlP => b"\x10",
            VideotexKey::CtrlQ => b"\x11",
            VideotexKey::CtrlR => b"\x12",
            VideotexKey::CtrlS => b"\x13",
            VideotexKey::CtrlT => b"\x14",
            VideotexKey::CtrlU => b"\x15",
            VideotexKey::CtrlV => b"\x16",
            VideotexKey::CtrlW => b"\x17",
            VideotexKey::CtrlX => b"\x18",
            VideotexKey::CtrlY => b"\x19",
            VideotexKey::CtrlZ => b"\x1a",
            VideotexKey::Esc => b"\x1b",
            VideotexKey::CtrlComma => b"\x1c",
            VideotexKey::CtrlMinus => b"\x1d",
            VideotexKey::CtrlFullStop => b"\x1e",
            VideotexKey::CtrlQuestionMark => b"\x1f",
            VideotexKey::Space => b"\x20",
            VideotexKey::Shift1 => b"\x21",
            VideotexKey::Shift2 => b"\x22",
            VideotexKey::Hash => b"\x23",
            VideotexKey::Shift4 => b"\x24",
            VideotexKey::Shift5 => b"\x25",
            VideotexKey::Shift6 => b"\x26",
            VideotexKey::Apostrophe => b"\x27",
            VideotexKey::Shift8 => b"\x28",
            VideotexKey::Shift9 => b"\x29",
            VideotexKey::Star => b"\x2a",
            VideotexKey::ShiftSemicolon => b"\x2b",
            VideotexKey::Comma => b"\x2c",
            VideotexKey::Minus => b"\x2d",
            VideotexKey::FullStop => b"\x2e",
            VideotexKey::ShiftQuestionMark => b"\x2f",
            VideotexKey::Digit0 => b"\x30",
            VideotexKey::Digit1 => b"\x31",
            VideotexKey::Digit2 => b"\x32",
            VideotexKey::Digit3 => b"\x33",
            VideotexKey::Digit4 => b"\x34",
            VideotexKey::Digit5 => b"\x35",
            VideotexKey::Digit6 => b"\x36",
            VideotexKey::Digit7 => b"\x37",
            VideotexKey::Digit8 => b"\x38",
            VideotexKey::Digit9 => b"\x39",
            VideotexKey::Colon => b"\x3a",
            VideotexKey::Semicolon => b"\x3b",
            VideotexKey::ShiftComma => b"\x3c",
            VideotexKey::ShiftMinus => b"\x3d",
            VideotexKey::ShiftFullStop => b"\x3e",
            VideotexKey::QuestionMark => b"\x3f",
            VideotexKey::ShiftApostrophe => b"\x40",
            VideotexKey::A => b"\x41",
            VideotexKey::B => b"\x42",
            VideotexKey::C => b"\x43",
            VideotexKey::D => b"\x44",
            VideotexKey::E => b"\x45",
            VideotexKey::F => b"\x46",
            VideotexKey::G => b"\x47",
            VideotexKey::H => b"\x48",
            VideotexKey::I => b"\x49",
            VideotexKey::J => b"\x4a",
            VideotexKey::K => b"\x4b",
            VideotexKey::L => b"\x4c",
            VideotexKey::M => b"\x4d",
            VideotexKey::N => b"\x4e",
            VideotexKey::O => b"\x4f",
            VideotexKey::P => b"\x50",
            VideotexKey::Q => b"\x51",
            VideotexKey::R => b"\x52",
            VideotexKey::S => b"\x53",
            VideotexKey::T => b"\x54",
            VideotexKey::U => b"\x55",
            VideotexKey::V => b"\x56",
            VideotexKey::W => b"\x57",
            VideotexKey::X => b"\x58",
            VideotexKey::Y => b"\x59",
            VideotexKey::Z => b"\x5a",
            VideotexKey::ShiftStar => b"\x5b",
            VideotexKey::ShiftCancel => b"\x5c",
            VideotexKey::ShiftHash => b"\x5d",
            VideotexKey::Shift0 => b"\x5e",
            VideotexKey::Ctrl6 => b"\x5f",
            VideotexKey::Ctrl5 => b"\x60",
            VideotexKey::LowerA => b"\x61",
            VideotexKey::LowerB => b"\x62",
            VideotexKey::LowerC => b"\x63",
            VideotexKey::LowerD => b"\x64",
            VideotexKey::LowerE => b"\x65",
            VideotexKey::LowerF => b"\x66",
            VideotexKey::LowerG => b"\x67",
            VideotexKey::LowerH => b"\x68",
            VideotexKey::LowerI => b"\x69",
            VideotexKey::LowerJ => b"\x6a",
            VideotexKey::LowerK => b"\x6b",
            VideotexKey::LowerL => b"\x6c",
            VideotexKey::LowerM => b"\x6d",
            VideotexKey::LowerN => b"\x6e",
            VideotexKey::LowerO => b"\x6f",
            VideotexKey::LowerP => b"\x70",
            VideotexKey::LowerQ => b"\x71",
            VideotexKey::LowerR => b"\x72",
            VideotexKey::LowerS => b"\x73",
            VideotexKey::LowerT => b"\x74",
            VideotexKey::LowerU => b"\x75",
            VideotexKey::LowerV => b"\x76",
            VideotexKey::LowerW => b"\x77",
            VideotexKey::LowerX => b"\x78",
            VideotexKey::LowerY => b"\x79",
            VideotexKey::LowerZ => b"\x7a",
            VideotexKey::Ctrl1 => b"\x7b",
            VideotexKey::Ctrl2 => b"\x7c",
            VideotexKey::Ctrl3 => b"\x7d",
            VideotexKey::Ctrl4 => b"\x7e",
            VideotexKey::CtrlCancel => b"\x19\x23",
            VideotexKey::ShiftCorrection => b"\x19\x27",
            VideotexKey::Ctrl8 => b"\x19\x2c",
            VideotexKey::Ctrl9 => b"\x19\x2e",
            VideotexKey::CtrlHash => b"\x19\x2f",
            VideotexKey::Ctrl0 => b"\x19\x30",
            VideotexKey::CtrlStar => b"\x19\x31",
            VideotexKey::Ctrl7 => b"\x19\x38",
            VideotexKey::ShiftNext => b"\x19\x41",
            VideotexKey::ShiftPrevious => b"\x19\x42",
            VideotexKey::ShiftSummary => b"\x19\x43",
            VideotexKey::ShiftGuide => b"\x19\x48",
            VideotexKey::CtrlCorrection => b"\x19\x4b\x63",
            VideotexKey::CtrlReturn => b"\x19\x6a",
            VideotexKey::CtrlRepeat => b"\x19\x7a",
            VideotexKey::CtrlNext => b"\x19\x7b",
        }
    }

    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        let key = match frame {
            [0x00] => VideotexKey::CtrlApostrophe,
            [0x01] => VideotexKey::CtrlA,
            [0x02] => VideotexKey::CtrlB,
            [0x03] => VideotexKey::CtrlC,
            [0x04] => VideotexKey::CtrlD,
            [0x05] => VideotexKey::CtrlE,
            [0x06] => VideotexKey::CtrlF,
            [0x07] => VideotexKey::CtrlG,
            [0x08] => VideotexKey::CtrlH,
            [0x09] => VideotexKey::CtrlI,
            [0x0A] => VideotexKey::CtrlJ,
            [0x0B] => VideotexKey::CtrlK,
            [0x0C] => VideotexKey::CtrlL,
            [0x0E] => VideotexKey::CtrlN,
            [0x0F] => VideotexKey::CtrlO,
            [0x10] => VideotexKey::CtrlP,
            [0x11] => VideotexKey::CtrlQ,
            [0x12] => VideotexKey::CtrlR,
            [0x13] => VideotexKey::CtrlS,
            [0x14] => VideotexKey::CtrlT,
            [0x15] => VideotexKey::CtrlU,
            [0x16] => VideotexKey::CtrlV,
            [0x17] => VideotexKey::CtrlW,
            [0x18] => VideotexKey::CtrlX,
            [0x19] => VideotexKey::CtrlY,
            [0x1A] => VideotexKey::CtrlZ,
            [0x1B] => VideotexKey::Esc,
            [0x1C] => VideotexKey::CtrlComma,
            [0x1D] => VideotexKey::CtrlMinus,
            [0x1E] => VideotexKey::CtrlFullStop,
            [0x1F] => VideotexKey::CtrlQuestionMark,
            [0x20] => VideotexKey::Space,
            [0x21] => VideotexKey::Shift1,
            [0x22] => VideotexKey::Shift2,
            [0x23] => VideotexKey::Hash,
            [0x24] => VideotexKey::Shift4,
            [0x25] => VideotexKey::Shift5,
            [0x26] => VideotexKey::Shift6,
            [0x27] => VideotexKey::Apostrophe,
            [0x28] => VideotexKey::Shift8,
            [0x29] => VideotexKey::Shift9,
            [0x2A] => VideotexKey::Star,
            [0x2B] => VideotexKey::ShiftSemicolon,
            [0x2C] => VideotexKey::Comma,
            [0x2D] => VideotexKey::Minus,
            [0x2E] => VideotexKey::FullStop,
            [0x2F] => VideotexKey::ShiftQuestionMark,
            [0x30] => VideotexKey::Digit0,
            [0x31] => VideotexKey::Digit1,
            [0x32] => VideotexKey::Digit2,
            [0x33] => VideotexKey::Digit3,
            [0x34] => VideotexKey::Digit4,
            [0x35] => VideotexKey::Digit5,
            [0x36] => VideotexKey::Digit6,
            [0x37] => VideotexKey::Digit7,
            [0x38] => VideotexKey::Digit8,
            [0x39] => VideotexKey::Digit9,
            [0x3A] => VideotexKey::Colon,
            [0x3B] => VideotexKey::Semicolon,
            [0x3C] => VideotexKey::ShiftComma,
            [0x3D] => VideotexKey::ShiftMinus,
            [0x3E] => VideotexKey::ShiftFullStop,
            [0x3F] => VideotexKey::QuestionMark,
            [0x40] => VideotexKey::ShiftApostrophe,
            [0x41] => VideotexKey::A,
            [0x42] => VideotexKey::B,
            [0x43] => VideotexKey::C,
            [0x44] => VideotexKey::D,
            [0x45] => VideotexKey::E,
            [0x46] => VideotexKey::F,
            [0x47] => VideotexKey::G,
            [0x48] => VideotexKey::H,
            [0x49] => VideotexKey::I,
            [0x4A] => VideotexKey::J,
            [0x4B] => VideotexKey::K,
            [0x4C] => VideotexKey::L,
            [0x4D] => VideotexKey::M,
            [0x4E] => VideotexKey::N,
            [0x4F] => VideotexKey::O,
            [0x50] => VideotexKey::P,
            [0x51] => VideotexKey::Q,
            [0x52] => VideotexKey::R,
            [0x53] => VideotexKey::S,
            [0x54] => VideotexKey::T,
            [0x55] => VideotexKey::U,
            [0x56] => VideotexKey::V,
            [0x57] => VideotexKey::W,
            [0x58] => VideotexKey::X,
            [0x59] => VideotexKey::Y,
            [0x5A] => VideotexKey::Z,
            [0x5B] => VideotexKey::ShiftStar,
            [0x5C] => VideotexKey::ShiftCancel,
            [0x5D] => VideotexKey::ShiftHash,
            [0x5E] => VideotexKey::Shift0,
            [0x5F] => VideotexKey::Ctrl6,
            [0x60] => VideotexKey::Ctrl5,
            [0x61] => VideotexKey::LowerA,
            [0x62] => VideotexKey::LowerB,
            [0x63] => VideotexKey::LowerC,
            [0x64] => VideotexKey::LowerD,
            [0x65] => VideotexKey::LowerE,
            [0x66] => VideotexKey::LowerF,
            [0x67] => VideotexKey::LowerG,
            [0x68] => VideotexKey::LowerH,
            [0x69] => VideotexKey::LowerI,
            [0x6A] => VideotexKey::LowerJ,
            [0x6B] => VideotexKey::LowerK,
            [0x6C] => VideotexKey::LowerL,
            [0x6D] => VideotexKey::LowerM,
            [0x6E] => VideotexKey::LowerN,
            [0x6F] => VideotexKey::LowerO,
            [0x70] => VideotexKey::LowerP,
            [0x71] => VideotexKey::LowerQ,
            [0x72] => VideotexKey::LowerR,
            [0x73] => VideotexKey::LowerS,
            [0x74] => VideotexKey::LowerT,
            [0x75] => VideotexKey::LowerU,
            [0x76] => VideotexKey::LowerV,
            [0x77] => VideotexKey::LowerW,
            [0x78] => VideotexKey::LowerX,
            [0x79] => VideotexKey::LowerY,
            [0x7A] => VideotexKey::LowerZ,
            [0x7B] => VideotexKey::Ctrl1,
            [0x7C] => VideotexKey::Ctrl2,
            [0x7D] => VideotexKey::Ctrl3,
            [0x7E] => VideotexKey::Ctrl4,
            [0x19, 0x23] => VideotexKey::CtrlCancel,
            [0x19, 0x27] => VideotexKey::ShiftCorrection,
            [0x19, 0x2C] => VideotexKey::Ctrl8,
            [0x19, 0x2E] => VideotexKey::Ctrl9,
            [0x19, 0x2F] => VideotexKey::CtrlHash,
            [0x19, 0x30] => VideotexKey::Ctrl0,
            [0x19, 0x31] => VideotexKey::CtrlStar,
            [0x19, 0x38] => VideotexKey::Ctrl7,
            [0x19, 0x41] => VideotexKey::ShiftNext,
            [0x19, 0x42] => VideotexKey::ShiftPrevious,
            [0x19, 0x43] => VideotexKey::ShiftSummary,
            [0x19, 0x48] => VideotexKey::ShiftGuide,
            [0x19, 0x4B, 0x63] => VideotexKey::CtrlCorrection,
            [0x19, 0x6A] => VideotexKey::CtrlReturn,
            [0x19, 0x7A] => VideotexKey::CtrlRepeat,
            [0x19, 0x7B] => VideotexKey::CtrlNext,
            _ => return None,
        };
        Some(key)
    }

    /// Character this key types, or `None` for control codes.
    pub fn printable(self) -> Option<char> {
        match self {
            VideotexKey::CtrlApostrophe
            | VideotexKey::CtrlA
            | VideotexKey::CtrlB
            | VideotexKey::CtrlC
            | VideotexKey::CtrlD
            | VideotexKey::CtrlE
            | VideotexKey::CtrlF
            | VideotexKey::CtrlG
            | VideotexKey::CtrlH
            | VideotexKey::CtrlI
            | VideotexKey::CtrlJ
            | VideotexKey::CtrlK
            | VideotexKey::CtrlL
            | VideotexKey::CtrlN
            | VideotexKey::CtrlO
            | VideotexKey::CtrlP
            | VideotexKey::CtrlQ
            | VideotexKey::CtrlR
            | VideotexKey::CtrlS
            | VideotexKey::CtrlT
            | VideotexKey::CtrlU
            | VideotexKey::CtrlV
            | VideotexKey::CtrlW
            | VideotexKey::CtrlX
            | VideotexKey::CtrlY
            | VideotexKey::CtrlZ
            | VideotexKey::Esc
            | VideotexKey::CtrlComma
            | VideotexKey::CtrlMinus
            | VideotexKey::CtrlFullStop
            | VideotexKey::CtrlQuestionMark => None,
            VideotexKey::Space => Some(' '),
            VideotexKey::Shift1 => Some('!'),
            VideotexKey::Shift2 => Some('"'),
            VideotexKey::Hash => Some('#'),
            VideotexKey::Shift4 => Some('$'),
            VideotexKey::Shift5 => Some('%'),
            VideotexKey::Shift6 => Some('&'),
            VideotexKey::Apostrophe => Some('\''),
            VideotexKey::Shift8 => Some('('),
            VideotexKey::Shift9 => Some(')'),
            VideotexKey::Star => Some('*'),
            VideotexKey::ShiftSemicolon => Some('+'),
            VideotexKey::Comma => Some(','),
            VideotexKey::Minus => Some('-'),
            VideotexKey::FullStop => Some('.'),
            VideotexKey::ShiftQuestionMark => Some('/'),
            VideotexKey::Digit0 => Some('0'),
            VideotexKey::Digit1 => Some('1'),
            VideotexKey::Digit2 => Some('2'),
            VideotexKey::Digit3 => Some('3'),
            VideotexKey::Digit4 => Some('4'),
            VideotexKey::Digit5 => Some('5'),
            VideotexKey::Digit6 => Some('6'),
            VideotexKey::Digit7 => Some('7'),
            VideotexKey::Digit8 => Some('8'),
            VideotexKey::Digit9 => Some('9'),
            VideotexKey::Colon => Some(':'),
            VideotexKey::Semicolon => Some(';'),
            VideotexKey::ShiftComma => Some('<'),
            VideotexKey::ShiftMinus => Some('='),
            VideotexKey::ShiftFullStop => Some('>'),
            VideotexKey::QuestionMark => Some('?'),
            VideotexKey::ShiftApostrophe => Some('@'),
            VideotexKey::A => Some('A'),
            VideotexKey::B => Some('B'),
            VideotexKey::C => Some('C'),
            VideotexKey::D => Some('D'),
            VideotexKey::E => Some('E'),
            VideotexKey::F => Some('F'),
            VideotexKey::G => Some('G'),
            VideotexKey::H => Some('H'),
            VideotexKey::I => Some('I'),
            VideotexKey::J => Some('J'),
            VideotexKey::K => Some('K'),
            VideotexKey::L => Some('L'),
            VideotexKey::M => Some('M'),
            VideotexKey::N => Some('N'),
            VideotexKey::O => Some('O'),
            VideotexKey::P => Some('P'),
            VideotexKey::Q => Some('Q'),
            VideotexKey::R => Some('R'),
            VideotexKey::S => Some('S'),
            VideotexKey::T => Some('T'),
            VideotexKey::U => Some('U'),
            VideotexKey::V => Some('V'),
            VideotexKey::W => Some('W'),
            VideotexKey::X => Some('X'),
            VideotexKey::Y => Some('Y'),
            VideotexKey::Z => Some('Z'),
            VideotexKey::ShiftStar => Some('['),
            VideotexKey::ShiftCancel => Some('\\'),
            VideotexKey::ShiftHash => Some(']'),
            VideotexKey::Shift0 => Some('↑'),
            VideotexKey::Ctrl6 => Some('_'),
            VideotexKey::Ctrl5 => Some('-'),
            VideotexKey::LowerA => Some('a'),
            VideotexKey::LowerB => Some('b'),
            VideotexKey::LowerC => Some('c'),
            VideotexKey::LowerD => Some('d'),
            VideotexKey::LowerE => Some('e'),
            VideotexKey::LowerF => Some('f'),
            VideotexKey::LowerG => Some('g'),
            VideotexKey::LowerH => Some('h'),
            VideotexKey::LowerI => Some('i'),
            VideotexKey::LowerJ => Some('j'),
            VideotexKey::LowerK => Some('k'),
            VideotexKey::LowerL => Some('l'),
            VideotexKey::LowerM => Some('m'),
            VideotexKey::LowerN => Some('n'),
            VideotexKey::LowerO => Some('o'),
            VideotexKey::LowerP => Some('p'),
            VideotexKey::LowerQ => Some('q'),
            VideotexKey::LowerR => Some('r'),
            VideotexKey::LowerS => Some('s'),
            VideotexKey::LowerT => Some('t'),
            VideotexKey::LowerU => Some('u'),
            VideotexKey::LowerV => Some('v'),
            VideotexKey::LowerW => Some('w'),
            VideotexKey::LowerX => Some('x'),
            VideotexKey::LowerY => Some('y'),
            VideotexKey::LowerZ => Some('z'),
            VideotexKey::Ctrl1 => Some('|'),
            VideotexKey::Ctrl2 => Some('|'),
            VideotexKey::Ctrl3 => Some('|'),
            VideotexKey::Ctrl4 => Some('_'),
            VideotexKey::CtrlCancel => Some('£'),
            VideotexKey::ShiftCorrection => Some('§'),
            VideotexKey::Ctrl8 => Some('←'),
            VideotexKey::Ctrl9 => Some('→'),
            VideotexKey::CtrlHash => Some('↓'),
            VideotexKey::Ctrl0 => Some('°'),
            VideotexKey::CtrlStar => Some('±'),
            VideotexKey::Ctrl7 => Some('÷'),
            VideotexKey::ShiftNext => Some('`'),
            VideotexKey::ShiftPrevious => Some('´'),
            VideotexKey::ShiftSummary => Some('^'),
            VideotexKey::ShiftGuide => Some('¨'),
            VideotexKey::CtrlCorrection => Some('ç'),
            VideotexKey::CtrlReturn => Some('Œ'),
            VideotexKey::CtrlRepeat => Some('œ'),
            VideotexKey::CtrlNext => Some('β'),
        }
    }
}
