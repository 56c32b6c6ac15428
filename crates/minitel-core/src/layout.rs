//! Cursor movement and screen-editing byte builders.
//!
//! Short moves (fewer than four cells) repeat a single control byte, which is
//! cheaper than a `CSI` sequence on a slow line.

pub const BS: u8 = 0x08;
pub const HT: u8 = 0x09;
pub const LF: u8 = 0x0A;
pub const VT: u8 = 0x0B;
pub const FF: u8 = 0x0C;
pub const CR: u8 = 0x0D;
pub const CAN: u8 = 0x18;
pub const RS: u8 = 0x1E;
pub const US: u8 = 0x1F;
/// Control sequence introducer.
pub const CSI: [u8; 2] = [0x1B, 0x5B];

const CUD: u8 = b'B';
const CUF: u8 = b'C';
const CUB: u8 = b'D';

/// Below this count a move repeats the single-cell control byte.
const SHORT_MOVE: u16 = 4;

/// Scope of an erase-in-display request (`CSI n J`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseDisplay {
    CursorToEnd = 0,
    StartToCursor = 1,
    All = 2,
}

/// Scope of an erase-in-line request (`CSI n K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLine {
    CursorToEnd,
    StartToCursor,
    All,
}

fn csi(params: &str, final_byte: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(3 + params.len());
    out.extend_from_slice(&CSI);
    out.extend_from_slice(params.as_bytes());
    out.push(final_byte);
    out
}

fn short_or_csi(n: u16, single: u8, final_byte: u8) -> Vec<u8> {
    if n < SHORT_MOVE {
        vec![single; usize::from(n)]
    } else {
        csi(&n.to_string(), final_byte)
    }
}

pub fn carriage_return() -> Vec<u8> {
    vec![CR]
}

/// Moves up `n` rows.  Always uses `VT`; `CSI n A` misbehaves on row 1.
pub fn move_cursor_up(n: u16) -> Vec<u8> {
    vec![VT; usize::from(n)]
}

pub fn move_cursor_down(n: u16) -> Vec<u8> {
    short_or_csi(n, LF, CUD)
}

pub fn move_cursor_right(n: u16) -> Vec<u8> {
    short_or_csi(n, HT, CUF)
}

pub fn move_cursor_left(n: u16) -> Vec<u8> {
    short_or_csi(n, BS, CUB)
}

/// Absolute position, 1-based row and column.
pub fn set_cursor_position(row: u16, col: u16) -> Vec<u8> {
    csi(&format!("{row};{col}"), b'H')
}

/// Moves the cursor to row 1, column 1.
pub fn reset_cursor() -> Vec<u8> {
    vec![RS]
}

/// Clears the screen.
pub fn clear() -> Vec<u8> {
    vec![FF]
}

/// Fills the rest of the row with spaces in the current attributes.
pub fn fill_line() -> Vec<u8> {
    vec![CAN]
}

pub fn erase_in_display(scope: EraseDisplay) -> Vec<u8> {
    csi(&(scope as u8).to_string(), b'J')
}

pub fn erase_in_line(scope: EraseLine) -> Vec<u8> {
    match scope {
        EraseLine::CursorToEnd => csi("", b'K'),
        EraseLine::StartToCursor => csi("1", b'K'),
        EraseLine::All => csi("2", b'K'),
    }
}

/// Deletes `n` characters at the cursor (two-digit count).
pub fn delete_chars(n: u8) -> Vec<u8> {
    csi(&format!("{n:02}"), b'P')
}

pub fn set_insert_mode() -> Vec<u8> {
    csi("4", b'h')
}

pub fn unset_insert_mode() -> Vec<u8> {
    csi("4", b'l')
}

pub fn delete_lines(n: u16) -> Vec<u8> {
    csi(&n.to_string(), b'M')
}

pub fn insert_lines(n: u16) -> Vec<u8> {
    csi(&n.to_string(), b'L')
}

/// Sub-section positioning: `US` followed by row and column with bit 6 set.
pub fn sub_section(row: u8, col: u8) -> Vec<u8> {
    vec![US, row | 0x40, col | 0x40]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_moves_repeat_control_byte() {
        assert_eq!(move_cursor_right(3), vec![HT, HT, HT]);
        assert_eq!(move_cursor_down(1), vec![LF]);
        assert_eq!(move_cursor_left(2), vec![BS, BS]);
    }

    #[test]
    fn test_long_moves_use_csi() {
        assert_eq!(move_cursor_right(4), b"\x1b[4C".to_vec());
        assert_eq!(move_cursor_down(12), b"\x1b[12B".to_vec());
        assert_eq!(move_cursor_left(39), b"\x1b[39D".to_vec());
    }

    #[test]
    fn test_move_up_never_uses_csi() {
        assert_eq!(move_cursor_up(5), vec![VT; 5]);
    }

    #[test]
    fn test_zero_move_is_empty() {
        assert!(move_cursor_right(0).is_empty());
    }

    #[test]
    fn test_absolute_position() {
        assert_eq!(set_cursor_position(12, 5), b"\x1b[12;5H".to_vec());
    }

    #[test]
    fn test_erase_sequences() {
        assert_eq!(erase_in_display(EraseDisplay::All), b"\x1b[2J".to_vec());
        assert_eq!(erase_in_line(EraseLine::CursorToEnd), b"\x1b[K".to_vec());
        assert_eq!(erase_in_line(EraseLine::StartToCursor), b"\x1b[1K".to_vec());
    }

    #[test]
    fn test_editing_sequences() {
        assert_eq!(delete_chars(3), b"\x1b[03P".to_vec());
        assert_eq!(set_insert_mode(), b"\x1b[4h".to_vec());
        assert_eq!(unset_insert_mode(), b"\x1b[4l".to_vec());
        assert_eq!(delete_lines(2), b"\x1b[2M".to_vec());
        assert_eq!(insert_lines(1), b"\x1b[1L".to_vec());
    }

    #[test]
    fn test_sub_section_sets_bit_six() {
        assert_eq!(sub_section(1, 1), vec![US, 0x41, 0x41]);
    }

    #[test]
    fn test_single_byte_builders() {
        assert_eq!(carriage_return(), vec![CR]);
        assert_eq!(clear(), vec![FF]);
        assert_eq!(reset_cursor(), vec![RS]);
        assert_eq!(fill_line(), vec![CAN]);
    }
}
