//! Text cursor
//!
//! Position of the next character in glyph-grid units. The cursor is plain
//! data owned by whoever drives the console; it knows nothing about pixels
//! except how to turn a cell into an origin for a given glyph size.

use serde::{Deserialize, Serialize};

/// Cursor position in the text grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Row position (0-indexed)
    pub row: usize,
    /// Column position (0-indexed)
    pub col: usize,
}

impl Cursor {
    /// Create a new cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an absolute cell
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    /// Back to (0, 0)
    pub fn home(&mut self) {
        *self = Self::default();
    }

    /// Column 0 of the next row
    pub fn newline(&mut self) {
        self.col = 0;
        self.row += 1;
    }

    /// One column to the right
    pub fn advance(&mut self) {
        self.col += 1;
    }

    /// Bring the cursor back inside a `cols` x `rows` grid.
    ///
    /// Reaching the right edge wraps to the next row. Running off the bottom
    /// holds the cursor on the last row and returns `true`: the caller has to
    /// scroll the screen up by one row.
    pub fn wrap(&mut self, cols: usize, rows: usize) -> bool {
        if self.col >= cols {
            self.col = 0;
            self.row += 1;
        }

        if self.row >= rows {
            self.row = rows.saturating_sub(1);
            return true;
        }

        false
    }

    /// Pixel origin of the cursor's cell for a glyph of the given size
    pub fn pixel_position(&self, glyph_width: usize, glyph_height: usize) -> (usize, usize) {
        (
            self.col.saturating_mul(glyph_width),
            self.row.saturating_mul(glyph_height),
        )
    }
}
