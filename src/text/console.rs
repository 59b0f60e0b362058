//! Text console
//!
//! Sequential text output over a surface: characters go at the cursor, the
//! cursor wraps at the right edge, and running off the bottom scrolls the
//! whole surface up by one glyph row.

use tracing::{trace, warn};

use super::{Cursor, Font};
use crate::core::{raster, Region, Rgb565, Surface};
use crate::error::Result;

/// A cursor-driven text writer.
///
/// The console does not hold on to the surface; every call borrows it, so
/// one console can be pointed at different surfaces over its lifetime.
#[derive(Debug, Clone)]
pub struct Console<'f> {
    font: &'f Font,
    cursor: Cursor,
}

impl<'f> Console<'f> {
    /// Create a console with the cursor at home
    pub fn new(font: &'f Font) -> Self {
        Self::with_cursor(font, Cursor::new())
    }

    /// Create a console resuming at an existing cursor position
    pub fn with_cursor(font: &'f Font, cursor: Cursor) -> Self {
        Self { font, cursor }
    }

    pub fn font(&self) -> &'f Font {
        self.font
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Write one character at the cursor and advance.
    ///
    /// `'\n'` only moves the cursor to the start of the next row. Anything
    /// else is drawn and moves the cursor one column right; reaching the
    /// right edge wraps, and leaving the last row scrolls.
    pub fn put_char<S: Surface + ?Sized>(&mut self, surface: &mut S, c: char, fg: Rgb565, bg: Rgb565) {
        if c == '\n' {
            self.cursor.newline();
        } else {
            let (x, y) = self
                .cursor
                .pixel_position(self.font.width(), self.font.height());
            self.font.draw_glyph(surface, c, x, y, fg, bg);
            self.cursor.advance();
        }

        let (cols, rows) = self.font.grid_size(surface.width(), surface.height());
        if self.cursor.wrap(cols, rows) {
            if let Err(e) = self.scroll(surface) {
                warn!("Skipping scroll: {}", e);
            }
        }
    }

    /// Write every character of `text` in order
    pub fn put_text<S: Surface + ?Sized>(&mut self, surface: &mut S, text: &str, fg: Rgb565, bg: Rgb565) {
        for c in text.chars() {
            self.put_char(surface, c, fg, bg);
        }
    }

    /// Move the surface contents up by one glyph row.
    ///
    /// Everything below the first glyph row is captured and pasted back at
    /// the top, then the last text row (and any partial row under it) is
    /// cleared to black. The cursor is not touched.
    pub fn scroll<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let (width, height) = (surface.width(), surface.height());
        let glyph_height = self.font.height();

        if glyph_height >= height {
            surface.clear(Rgb565::BLACK);
            return Ok(());
        }

        let region = Region::capture(&*surface, 0, glyph_height, width, height)?;
        region.paste(surface, 0, 0);

        let last_row = (height / glyph_height - 1) * glyph_height;
        raster::rect(surface, 0, last_row, width, height - last_row, Rgb565::BLACK);

        trace!(width, height, glyph_height, "scrolled");
        Ok(())
    }
}
