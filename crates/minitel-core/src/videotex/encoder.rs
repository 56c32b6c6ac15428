//! Grid-to-bytes encoder.
//!
//! # How the diff renderer works (for beginners)
//!
//! The terminal starts from default attributes with the cursor at row 1,
//! column 1.  The encoder scans the grid row by row and, for each cell,
//! decides whether anything must be sent:
//!
//! - A change of zone attributes always costs a cell: the attribute escape is
//!   followed by a delimiter space that occupies the position.  Any glyph
//!   drawn there is dropped (with a warning).
//! - A glyph is sent with the text attributes that differ from the last ones
//!   sent.
//! - Cells with nothing to send are skipped.  When output resumes, the cursor
//!   is moved with the cheapest sequence: a relative move right on the same
//!   row, a move down on the same column, otherwise an absolute position.
//!
//! Zone and text state are reset to defaults at the start of every row,
//! because the terminal does not carry them across row changes.  After the
//! last cell the text attributes are returned to their defaults.

use tracing::{trace, warn};

use crate::attributes::{TextAttributes, ZoneAttributes};
use crate::charset::{encode_into, VisualizationModule};
use crate::layout::{move_cursor_down, move_cursor_right, set_cursor_position};
use crate::videotex::page::{VideotexPage, COLUMNS, ROWS};

/// Position where a run of skipped cells started (0-based).
#[derive(Debug, Clone, Copy)]
struct Skip {
    row: usize,
    col: usize,
}

/// Renders `page` to the byte stream that reproduces it on a terminal using
/// `vm`, assuming default attributes and a home cursor at the start.
///
/// The output is deterministic: the same page and module always yield the same
/// bytes.
pub fn render(page: &VideotexPage, vm: VisualizationModule) -> Vec<u8> {
    let mut out = Vec::new();
    // Text attributes latched by the terminal, and the row they were set on.
    let mut previous_text = TextAttributes::default();
    let mut text_row = 0;
    let mut skip: Option<Skip> = None;

    for r in 0..ROWS {
        let mut previous_zone = ZoneAttributes::default();
        let mut double_width_in_row = false;

        for c in 0..COLUMNS {
            let cell = page.cell_at(r, c);
            let mut glyph = cell.glyph;

            let mut zone_diff = Vec::new();
            previous_zone.diff_into(&cell.zone, &mut zone_diff);
            if !zone_diff.is_empty() {
                if matches!(glyph, Some(g) if g != ' ') {
                    warn!(
                        row = r + 1,
                        col = c + 1,
                        "zone attributes need a blank cell, dropping {:?}",
                        glyph
                    );
                }
                glyph = None;
            }

            if zone_diff.is_empty() && glyph.is_none() {
                skip.get_or_insert(Skip { row: r, col: c });
                previous_zone = cell.zone;
                continue;
            }

            if let Some(from) = skip.take() {
                let moved = if from.row == r && !double_width_in_row {
                    move_cursor_right((c - from.col) as u16)
                } else if from.col == c {
                    move_cursor_down((r - from.row) as u16)
                } else {
                    set_cursor_position((r + 1) as u16, (c + 1) as u16)
                };
                trace!(row = r + 1, col = c + 1, "cursor move {:02x?}", moved);
                out.extend_from_slice(&moved);
            }

            if text_row != r {
                previous_text = TextAttributes::default();
                text_row = r;
            }
            out.extend_from_slice(&zone_diff);
            previous_text.diff_into(&cell.text, &mut out);
            previous_text = cell.text;
            if let Some(g) = glyph {
                encode_into(g, vm, &mut out);
            }
            if cell.text.double_width {
                double_width_in_row = true;
            }
            previous_zone = cell.zone;
        }
    }

    previous_text.diff_into(&TextAttributes::default(), &mut out);
    out
}

impl VideotexPage {
    /// Convenience wrapper around [`render`].
    pub fn render(&self, vm: VisualizationModule) -> Vec<u8> {
        render(self, vm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Color, DELIMITER, DOUBLE_WIDTH, ESC, NORMAL_SIZE};

    #[test]
    fn test_blank_page_renders_nothing() {
        assert!(VideotexPage::new().render(VisualizationModule::Vgp5).is_empty());
    }

    #[test]
    fn test_single_glyph_uses_absolute_position() {
        // Arrange
        let mut page = VideotexPage::new();
        page.set_text("A", 12, 5, None).unwrap();

        // Act
        let bytes = page.render(VisualizationModule::Vgp5);

        // Assert
        assert_eq!(bytes, b"\x1b[12;5HA".to_vec());
    }

    #[test]
    fn test_glyph_at_home_needs_no_move() {
        let mut page = VideotexPage::new();
        page.set_text("Hi", 1, 1, None).unwrap();
        assert_eq!(page.render(VisualizationModule::Vgp2), b"Hi".to_vec());
    }

    #[test]
    fn test_same_row_gap_moves_right() {
        let mut page = VideotexPage::new();
        page.set_text("A", 1, 1, None).unwrap();
        page.set_text("B", 1, 4, None).unwrap();
        assert_eq!(
            page.render(VisualizationModule::Vgp5),
            vec![b'A', 0x09, 0x09, b'B']
        );
    }

    #[test]
    fn test_same_column_gap_moves_down() {
        // Arrange: row 1 full so the skip starts at (2,1)
        let mut page = VideotexPage::new();
        page.set_text(&"x".repeat(COLUMNS), 1, 1, None).unwrap();
        page.set_text("y", 4, 1, None).unwrap();

        // Act
        let bytes = page.render(VisualizationModule::Vgp5);

        // Assert
        let mut expected = vec![b'x'; COLUMNS];
        expected.extend_from_slice(&[0x0A, 0x0A, b'y']);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_zone_change_drops_glyph_and_emits_delimiter() {
        let mut page = VideotexPage::new();
        let blue = ZoneAttributes {
            background: Color::Blue,
            ..ZoneAttributes::default()
        };
        page.draw_box(1, 1, 1, 3, blue).unwrap();
        page.set_text("abc", 1, 1, None).unwrap();

        let bytes = page.render(VisualizationModule::Vgp5);

        // The zone ends at column 4, which costs one more delimiter.
        assert_eq!(
            bytes,
            vec![ESC, 0x54, DELIMITER, b'b', b'c', ESC, 0x50, DELIMITER]
        );
    }

    #[test]
    fn test_text_attributes_reset_at_end() {
        let mut page = VideotexPage::new();
        let red = TextAttributes {
            color: Color::Red,
            ..TextAttributes::default()
        };
        page.set_text("R", 1, 1, Some(red)).unwrap();

        let bytes = page.render(VisualizationModule::Vgp5);

        assert_eq!(bytes, vec![ESC, 0x41, b'R', ESC, 0x47]);
    }

    #[test]
    fn test_accented_glyph_uses_rom_table() {
        let mut page = VideotexPage::new();
        page.set_text("é", 1, 1, None).unwrap();
        assert_eq!(
            page.render(VisualizationModule::Vgp5),
            vec![0x19, 0x42, b'e']
        );
    }

    #[test]
    fn test_double_width_glyph_forces_absolute_move_on_its_row() {
        // Arrange: a wide glyph occupies two columns, so a relative move
        // right would land one column off
        let mut page = VideotexPage::new();
        let wide = TextAttributes {
            double_width: true,
            ..TextAttributes::default()
        };
        page.set_text("A", 1, 1, Some(wide)).unwrap();
        page.set_text("B", 1, 5, None).unwrap();

        // Act
        let bytes = page.render(VisualizationModule::Vgp5);

        // Assert
        let mut expected = vec![ESC, DOUBLE_WIDTH, b'A'];
        expected.extend_from_slice(b"\x1b[1;5H");
        expected.extend_from_slice(&[ESC, NORMAL_SIZE, b'B']);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_text_attributes_are_declared_again_on_each_row() {
        // Arrange
        let mut page = VideotexPage::new();
        let red = TextAttributes {
            color: Color::Red,
            ..TextAttributes::default()
        };
        page.set_text("C", 3, 1, Some(red)).unwrap();
        page.set_text("D", 4, 1, Some(red)).unwrap();

        // Act
        let bytes = page.render(VisualizationModule::Vgp5);

        // Assert: red is sent on row 4 even though row 3 already set it
        let mut expected = b"\x1b[3;1H".to_vec();
        expected.extend_from_slice(&[ESC, 0x41, b'C']);
        expected.extend_from_slice(b"\x1b[4;1H");
        expected.extend_from_slice(&[ESC, 0x41, b'D', ESC, 0x47]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_mixed_page_renders_exact_bytes() {
        // Arrange
        let mut page = VideotexPage::new();
        let wide = TextAttributes {
            double_width: true,
            ..TextAttributes::default()
        };
        let red = TextAttributes {
            color: Color::Red,
            ..TextAttributes::default()
        };
        page.set_text("A", 1, 1, Some(wide)).unwrap();
        page.set_text("B", 1, 5, None).unwrap();
        page.set_text("C", 3, 1, Some(red)).unwrap();
        page.set_text("D", 4, 1, Some(red)).unwrap();

        // Act
        let bytes = page.render(VisualizationModule::Vgp2);

        // Assert
        let expected: Vec<u8> = [
            &[0x1b, 0x4e, 0x41][..],
            &[0x1b, 0x5b, 0x31, 0x3b, 0x35, 0x48, 0x1b, 0x4c, 0x42],
            &[0x1b, 0x5b, 0x33, 0x3b, 0x31, 0x48, 0x1b, 0x41, 0x43],
            &[0x1b, 0x5b, 0x34, 0x3b, 0x31, 0x48, 0x1b, 0x41, 0x44],
            &[0x1b, 0x47],
        ]
        .concat();
        assert_eq!(bytes, expected);
    }
}
