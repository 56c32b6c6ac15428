//! The off-screen cell grid and its drawing primitives.
//!
//! Rows and columns are 1-based in every public method, matching the
//! terminal's own cursor addressing.  Primitives never touch a transport; they
//! only mutate cells.  Out-of-bounds input is logged and rejected without
//! changing anything.

use thiserror::Error;
use tracing::error;

use crate::attributes::{TextAttributes, ZoneAttributes};

/// Usable rows in Videotex mode (row 0 is the status line).
pub const ROWS: usize = 24;
/// Columns in Videotex mode.
pub const COLUMNS: usize = 40;

pub const HORIZONTAL_RULE: char = '\u{2013}';
pub const VERTICAL_RULE: char = '|';
pub const FRAME_CORNER: char = '+';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{operation}: area at row {row}, column {col} ({height}x{width}) exceeds the 24x40 grid")]
    OutOfBounds {
        operation: &'static str,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

/// One screen position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub zone: ZoneAttributes,
    pub text: TextAttributes,
    /// `None` leaves the position untouched; `Some(' ')` writes a space.
    pub glyph: Option<char>,
}

/// A full Videotex page waiting to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideotexPage {
    cells: Vec<Cell>,
}

impl Default for VideotexPage {
    fn default() -> Self {
        Self::new()
    }
}

impl VideotexPage {
    /// A blank page: default attributes, no glyphs.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); ROWS * COLUMNS],
        }
    }

    /// Cell at a 1-based position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if (1..=ROWS).contains(&row) && (1..=COLUMNS).contains(&col) {
            self.cells.get(Self::index(row, col))
        } else {
            None
        }
    }

    /// Cell at a 0-based position; the renderer scans with these.
    pub(crate) fn cell_at(&self, r: usize, c: usize) -> &Cell {
        &self.cells[r * COLUMNS + c]
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[Self::index(row, col)]
    }

    fn index(row: usize, col: usize) -> usize {
        (row - 1) * COLUMNS + (col - 1)
    }

    fn check_area(
        operation: &'static str,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<(), GridError> {
        let fits = row >= 1
            && col >= 1
            && height >= 1
            && width >= 1
            && row + height - 1 <= ROWS
            && col + width - 1 <= COLUMNS;
        if fits {
            Ok(())
        } else {
            error!(operation, row, col, height, width, "invalid area");
            Err(GridError::OutOfBounds {
                operation,
                row,
                col,
                height,
                width,
            })
        }
    }

    /// Writes `text` from (row, col), wrapping to the next row at the right
    /// edge.  Past the last row, wrapping stays on the last row.
    ///
    /// When `attributes` is given every written cell takes them.
    pub fn set_text(
        &mut self,
        text: &str,
        row: usize,
        col: usize,
        attributes: Option<TextAttributes>,
    ) -> Result<(), GridError> {
        Self::check_area("set_text", row, col, 1, 1)?;
        let (mut row, mut col) = (row, col);
        for glyph in text.chars() {
            let cell = self.cell_mut(row, col);
            cell.glyph = Some(glyph);
            if let Some(attributes) = attributes {
                cell.text = attributes;
            }
            col += 1;
            if col > COLUMNS {
                col = 1;
                if row < ROWS {
                    row += 1;
                }
            }
        }
        Ok(())
    }

    /// Fills a rectangle with `zone` and clears its glyphs.
    pub fn draw_box(
        &mut self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
        zone: ZoneAttributes,
    ) -> Result<(), GridError> {
        Self::check_area("draw_box", row, col, height, width)?;
        for r in row..row + height {
            for c in col..col + width {
                let cell = self.cell_mut(r, c);
                cell.zone = zone;
                cell.glyph = None;
            }
        }
        Ok(())
    }

    /// Draws a full-width rule of en dashes on `row`.
    pub fn draw_horizontal_rule(&mut self, row: usize) -> Result<(), GridError> {
        Self::check_area("draw_horizontal_rule", row, 1, 1, COLUMNS)?;
        for c in 1..=COLUMNS {
            self.cell_mut(row, c).glyph = Some(HORIZONTAL_RULE);
        }
        Ok(())
    }

    /// Draws a full-height rule of bars on `col`.
    pub fn draw_vertical_rule(&mut self, col: usize) -> Result<(), GridError> {
        Self::check_area("draw_vertical_rule", 1, col, ROWS, 1)?;
        for r in 1..=ROWS {
            self.cell_mut(r, col).glyph = Some(VERTICAL_RULE);
        }
        Ok(())
    }

    /// Draws a frame whose outer edge spans `height` rows and `width` columns.
    pub fn draw_frame(
        &mut self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<(), GridError> {
        Self::check_area("draw_frame", row, col, height, width)?;
        if height < 2 || width < 2 {
            error!(row, col, height, width, "a frame needs at least 2x2 cells");
            return Err(GridError::OutOfBounds {
                operation: "draw_frame",
                row,
                col,
                height,
                width,
            });
        }
        let (bottom, right) = (row + height - 1, col + width - 1);
        for c in col + 1..right {
            self.cell_mut(row, c).glyph = Some(HORIZONTAL_RULE);
            self.cell_mut(bottom, c).glyph = Some(HORIZONTAL_RULE);
        }
        for r in row + 1..bottom {
            self.cell_mut(r, col).glyph = Some(VERTICAL_RULE);
            self.cell_mut(r, right).glyph = Some(VERTICAL_RULE);
        }
        for (r, c) in [(row, col), (row, right), (bottom, col), (bottom, right)] {
            self.cell_mut(r, c).glyph = Some(FRAME_CORNER);
        }
        Ok(())
    }
}
