//! Output helpers: raw sends, cursor, attributes and word-wrapped text.

use minitel_core::charset::encode_str;
use minitel_core::layout::{self, CR};
use minitel_core::protocol::command;
use minitel_core::videotex::render;
use minitel_core::{TextAttributes, VideotexPage, ZoneAttributes};
use tracing::{debug, warn};

use super::Minitel;
use crate::error::SessionError;
use crate::transport::Transport;

/// One step of word-wrapped output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    NewLine,
    CarriageReturn,
}

/// Splits `text` into runs that fit a `columns`-wide screen, starting at
/// 1-based column `col`.
///
/// A word that does not fit on the current row moves to the next one; a word
/// longer than a row is broken into row-wide runs, each ending at the right
/// edge where the terminal wraps to the next row.  A space landing at the
/// start of a wrapped row is dropped.
pub fn layout_text(text: &str, col: usize, columns: usize) -> Vec<Piece> {
    let columns = columns.max(1);
    let mut col = col.clamp(1, columns);
    let mut pieces = Vec::new();
    let mut run = String::new();
    let mut wrapped = false;

    let flush = |run: &mut String, pieces: &mut Vec<Piece>| {
        if !run.is_empty() {
            pieces.push(Piece::Text(std::mem::take(run)));
        }
    };

    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\n' => {
                flush(&mut run, &mut pieces);
                pieces.push(Piece::NewLine);
                col = 1;
                wrapped = false;
                i += 1;
            }
            '\r' => {
                flush(&mut run, &mut pieces);
                pieces.push(Piece::CarriageReturn);
                col = 1;
                wrapped = false;
                i += 1;
            }
            ' ' => {
                if !(wrapped && col == 1) {
                    run.push(' ');
                    col += 1;
                    if col > columns {
                        col = 1;
                        wrapped = true;
                    }
                }
                i += 1;
            }
            _ => {
                let word_len = chars[i..]
                    .iter()
                    .take_while(|c| !matches!(c, ' ' | '\n' | '\r'))
                    .count();
                if col > 1 && col + word_len - 1 > columns {
                    flush(&mut run, &mut pieces);
                    pieces.push(Piece::NewLine);
                    col = 1;
                }
                let word = &chars[i..i + word_len];
                for (n, &c) in word.iter().enumerate() {
                    run.push(c);
                    col += 1;
                    if col > columns {
                        col = 1;
                        // Break a word longer than a row at the right edge.
                        if n + 1 < word.len() {
                            flush(&mut run, &mut pieces);
                        }
                    }
                }
                // A word ending exactly at the right edge leaves the cursor on
                // the next row, so a following space would start that row.
                wrapped = col == 1;
                i += word_len;
            }
        }
    }
    flush(&mut run, &mut pieces);
    pieces
}

impl<T: Transport> Minitel<T> {
    /// Queues raw bytes (renderer output, VDT files, escape sequences).
    pub fn send(&mut self, data: &[u8]) -> Result<(), SessionError> {
        if data.is_empty() {
            return Ok(());
        }
        self.transport.enqueue(data)?;
        Ok(())
    }

    /// Renders `page` for this terminal's character ROM and queues it.
    pub fn send_page(&mut self, page: &VideotexPage) -> Result<(), SessionError> {
        let bytes = render(page, self.vm);
        debug!("sending page: {} bytes", bytes.len());
        self.send(&bytes)
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.send(&layout::clear())?;
        self.zone = ZoneAttributes::default();
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), SessionError> {
        self.send(&layout::reset_cursor())
    }

    pub fn show_cursor(&mut self) -> Result<(), SessionError> {
        self.send(&command::SHOW_CURSOR)
    }

    pub fn hide_cursor(&mut self) -> Result<(), SessionError> {
        self.send(&command::HIDE_CURSOR)
    }

    pub fn beep(&mut self) -> Result<(), SessionError> {
        self.send(&command::BEEP)
    }

    pub fn mask_full_screen(&mut self) -> Result<(), SessionError> {
        self.send(&command::MASK_FULL_SCREEN)
    }

    pub fn unmask_full_screen(&mut self) -> Result<(), SessionError> {
        self.send(&command::UNMASK_FULL_SCREEN)
    }

    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<(), SessionError> {
        self.send(&layout::set_cursor_position(row, col))
    }

    /// Asks the terminal where the cursor is: `(row, column)`.
    pub fn cursor_position(&mut self) -> Result<(u8, u8), SessionError> {
        let request = command::cursor_position();
        let payload = self.exchange(&request)?;
        command::parse_cursor_position(&payload).ok_or_else(|| {
            SessionError::Protocol(minitel_core::ProtocolError::ShortResponse {
                operation: request.operation,
                expected: request.reply_len,
                received: payload.len() + request.reply_prefix.len(),
            })
        })
    }

    // ── Attributes ──────────────────────────────────────────────────────────

    /// Emits only the escapes that differ from the active text attributes.
    ///
    /// Double-height glyphs extend one row upwards, so switching them on while
    /// the cursor sits on row 1 moves to row 2 first.
    pub fn set_text_attributes(&mut self, attributes: TextAttributes) -> Result<(), SessionError> {
        if attributes.double_height && !self.text.double_height {
            let (row, _) = self.cursor_position()?;
            if row == 1 {
                self.new_line()?;
            }
        }
        let diff = self.text.diff(&attributes);
        self.send(&diff)?;
        self.text = attributes;
        Ok(())
    }

    /// Emits only the escapes that differ from the active zone attributes,
    /// followed by the delimiter.
    pub fn set_zone_attributes(&mut self, attributes: ZoneAttributes) -> Result<(), SessionError> {
        let diff = self.zone.diff(&attributes);
        self.send(&diff)?;
        self.zone = attributes;
        Ok(())
    }

    pub fn reset_text_attributes(&mut self) -> Result<(), SessionError> {
        self.send(&TextAttributes::reset_sequence())?;
        self.text = TextAttributes::default();
        Ok(())
    }

    pub fn reset_zone_attributes(&mut self) -> Result<(), SessionError> {
        self.send(&ZoneAttributes::reset_sequence())?;
        self.zone = ZoneAttributes::default();
        Ok(())
    }

    // ── Text ────────────────────────────────────────────────────────────────

    /// Moves to the start of the next row.  Zone attributes do not survive a
    /// row change, so non-default ones are declared again.
    pub fn new_line(&mut self) -> Result<(), SessionError> {
        let mut bytes = layout::carriage_return();
        bytes.extend_from_slice(&layout::move_cursor_down(1));
        if !self.zone.is_default() {
            ZoneAttributes::default().diff_into(&self.zone, &mut bytes);
        }
        self.send(&bytes)
    }

    /// Writes `text` with word wrapping at the current screen width.
    ///
    /// `\n` starts a new row, `\r` returns to column 1.
    pub fn print(&mut self, text: &str) -> Result<(), SessionError> {
        let col = match self.cursor_position() {
            Ok((_, col)) => usize::from(col),
            Err(e) => {
                warn!("cursor position unknown ({e}), starting a new row");
                self.new_line()?;
                1
            }
        };
        let columns = usize::from(self.state.columns());
        for piece in layout_text(text, col, columns) {
            match piece {
                Piece::Text(run) => {
                    let bytes = encode_str(&run, self.vm);
                    self.send(&bytes)?;
                }
                Piece::NewLine => self.new_line()?,
                Piece::CarriageReturn => self.send(&[CR])?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;
    use crate::transport::SimulatedTerminal;
    use minitel_core::attributes::{Color, ESC};

    fn text(s: &str) -> Piece {
        Piece::Text(s.to_string())
    }

    #[test]
    fn test_layout_keeps_short_text_on_one_row() {
        assert_eq!(layout_text("hello world", 1, 40), vec![text("hello world")]);
    }

    #[test]
    fn test_layout_moves_word_that_does_not_fit() {
        // Arrange: 10 columns, "world" would span columns 7..11
        let pieces = layout_text("hello world", 1, 10);

        // Assert
        assert_eq!(pieces, vec![text("hello "), Piece::NewLine, text("world")]);
    }

    #[test]
    fn test_layout_long_word_is_broken_at_row_width() {
        let pieces = layout_text("abcdefghijkl", 1, 10);
        assert_eq!(pieces, vec![text("abcdefghij"), text("kl")]);
    }

    #[test]
    fn test_layout_word_wider_than_screen_moves_then_breaks() {
        // Arrange: a 45-character word typed from column 3 of a 40-column row
        let word = "x".repeat(45);

        // Act
        let pieces = layout_text(&format!("ab {word}"), 1, 40);

        // Assert
        assert_eq!(
            pieces,
            vec![
                text("ab "),
                Piece::NewLine,
                text(&"x".repeat(40)),
                text("xxxxx"),
            ]
        );
    }

    #[test]
    fn test_layout_drops_space_after_edge_wrap() {
        // "abcde" fills the 5-column row; the terminal wraps by itself
        let pieces = layout_text("abcde fg", 1, 5);
        assert_eq!(pieces, vec![text("abcdefg")]);
    }

    #[test]
    fn test_layout_control_characters() {
        let pieces = layout_text("a\nb\rc", 3, 40);
        assert_eq!(
            pieces,
            vec![
                text("a"),
                Piece::NewLine,
                text("b"),
                Piece::CarriageReturn,
                text("c")
            ]
        );
    }

    #[test]
    fn test_set_text_attributes_sends_only_changes() {
        // Arrange
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        handle.clear_sent();
        let red = TextAttributes {
            color: Color::Red,
            ..TextAttributes::default()
        };

        // Act
        session.set_text_attributes(red).unwrap();
        session.set_text_attributes(red).unwrap();

        // Assert
        assert_eq!(handle.sent(), vec![ESC, 0x41]);
        assert_eq!(session.text_attributes(), red);
    }

    #[test]
    fn test_double_height_on_first_row_moves_down() {
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        handle.set_cursor(1, 1);
        handle.clear_sent();

        session
            .set_text_attributes(TextAttributes {
                double_height: true,
                ..TextAttributes::default()
            })
            .unwrap();

        let writes = handle.writes();
        assert_eq!(writes[0], vec![ESC, 0x61]);
        assert_eq!(writes[1], vec![CR, layout::LF]);
        assert_eq!(writes[2], vec![ESC, 0x4D]);
    }

    #[test]
    fn test_new_line_redeclares_zone() {
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        let blue = ZoneAttributes {
            background: Color::Blue,
            ..ZoneAttributes::default()
        };
        session.set_zone_attributes(blue).unwrap();
        handle.clear_sent();

        session.new_line().unwrap();

        assert_eq!(handle.sent(), vec![CR, layout::LF, ESC, 0x54, 0x20]);
    }

    #[test]
    fn test_print_encodes_through_charset() {
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        handle.clear_sent();

        session.print("é").unwrap();

        let writes = handle.writes();
        assert_eq!(writes.last().unwrap(), &vec![0x19, 0x42, b'e']);
    }

    #[test]
    fn test_print_sends_long_word_as_row_wide_runs() {
        // Arrange
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        handle.set_cursor(5, 1);
        handle.clear_sent();

        // Act
        session.print(&"w".repeat(45)).unwrap();

        // Assert
        let writes = handle.writes();
        let runs = &writes[writes.len() - 2..];
        assert_eq!(runs[0], vec![b'w'; 40]);
        assert_eq!(runs[1], vec![b'w'; 5]);
    }

    #[test]
    fn test_send_page_renders_for_terminal_rom() {
        let terminal = SimulatedTerminal::new();
        let handle = terminal.handle();
        let mut session = Minitel::connect(terminal, SessionConfig::default()).unwrap();
        handle.clear_sent();
        let mut page = VideotexPage::new();
        page.set_text("A", 12, 5, None).unwrap();

        session.send_page(&page).unwrap();

        assert_eq!(handle.sent(), b"\x1b[12;5HA".to_vec());
    }
}
