//! Bitmap fonts
//!
//! A [`Font`] is a table of fixed-size glyphs indexed by character code. Each
//! glyph is `height` bytes, one byte per pixel row, and within a row bit 0 is
//! the leftmost pixel. Glyphs are therefore at most 8 pixels wide.
//!
//! Fonts are normally loaded from PSF files, the format used by the Linux
//! console (`setfont`). [`Font::builtin`] is an 8x8 ASCII font that is always
//! available.
//!
//! Characters are looked up through the font's unicode table when it has
//! one. Without a table only ASCII maps straight to a glyph index.
//!
//! # References
//!
//! - PSF1/PSF2 layout: https://www.win.tue.nl/~aeb/linux/kbd/font-formats-1.html

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use font8x8::legacy::BASIC_LEGACY;
use tracing::debug;

use crate::core::{Rgb565, Surface};
use crate::error::{Error, Result};

const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];
const PSF1_MODE512: u8 = 0x01;
const PSF1_MODEHASTAB: u8 = 0x02;
const PSF1_MODESEQ: u8 = 0x04;
const PSF1_SEPARATOR: u16 = 0xFFFF;
const PSF1_STARTSEQ: u16 = 0xFFFE;
const PSF2_MAGIC: [u8; 4] = [0x72, 0xb5, 0x4a, 0x86];
const PSF2_HAS_UNICODE_TABLE: usize = 0x01;
const PSF2_SEPARATOR: u8 = 0xFF;
const PSF2_STARTSEQ: u8 = 0xFE;
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A fixed-width, fixed-height bitmap font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    width: usize,
    height: usize,
    glyphs: Cow<'static, [u8]>,
    /// Character to glyph index, from a PSF unicode table
    unicode: Option<HashMap<char, usize>>,
}

impl Font {
    /// Wrap a raw glyph table.
    ///
    /// `glyphs` holds `height` bytes per glyph, glyph `n` being the one for
    /// character code `n`.
    pub fn new(width: usize, height: usize, glyphs: impl Into<Cow<'static, [u8]>>) -> Result<Self> {
        let glyphs = glyphs.into();

        if width == 0 || width > 8 {
            return Err(Error::Font(format!("glyph width {} not in 1..=8", width)));
        }
        if height == 0 {
            return Err(Error::Font("glyph height is zero".to_string()));
        }
        if glyphs.len() % height != 0 {
            return Err(Error::Font(format!(
                "table of {} bytes is not a whole number of {}-byte glyphs",
                glyphs.len(),
                height
            )));
        }

        Ok(Self {
            width,
            height,
            glyphs,
            unicode: None,
        })
    }

    /// The compiled-in 8x8 font covering ASCII
    pub fn builtin() -> Self {
        let table: &'static [[u8; 8]; 128] = &BASIC_LEGACY;
        Self {
            width: 8,
            height: 8,
            glyphs: Cow::Borrowed(bytemuck::cast_slice(table.as_slice())),
            unicode: None,
        }
    }

    fn with_unicode(mut self, unicode: HashMap<char, usize>) -> Self {
        self.unicode = Some(unicode);
        self
    }

    /// Parse a PSF1 or PSF2 font.
    ///
    /// PSF stores rows most significant bit first, so every row is bit
    /// reversed on load. Unicode mapping tables are ignored.
    pub fn from_psf(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(&GZIP_MAGIC) {
            return Err(Error::Font(
                "font is gzip compressed, decompress it first".to_string(),
            ));
        }
        if bytes.starts_with(&PSF2_MAGIC) {
            return Self::from_psf2(bytes);
        }
        if bytes.starts_with(&PSF1_MAGIC) {
            return Self::from_psf1(bytes);
        }
        Err(Error::Font("not a PSF font".to_string()))
    }

    fn from_psf1(bytes: &[u8]) -> Result<Self> {
        let header = bytes
            .get(..4)
            .ok_or_else(|| Error::Font("truncated PSF1 header".to_string()))?;
        let mode = header[2];
        let height = header[3] as usize;
        let count = if mode & PSF1_MODE512 != 0 { 512 } else { 256 };

        let len = count * height;
        let table = glyph_table(bytes, 4, len)?;
        let font = Self::new(8, height, table)?;

        if mode & (PSF1_MODEHASTAB | PSF1_MODESEQ) == 0 {
            return Ok(font);
        }
        let unicode = psf1_unicode_table(&bytes[4 + len..], count)?;
        Ok(font.with_unicode(unicode))
    }

    fn from_psf2(bytes: &[u8]) -> Result<Self> {
        let field = |index: usize| -> Result<usize> {
            let start = 4 + index * 4;
            bytes
                .get(start..start + 4)
                .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
                .ok_or_else(|| Error::Font("truncated PSF2 header".to_string()))
        };

        let header_size = field(1)?;
        let flags = field(2)?;
        let count = field(3)?;
        let glyph_size = field(4)?;
        let height = field(5)?;
        let width = field(6)?;

        if width == 0 || width > 8 {
            return Err(Error::Font(format!(
                "PSF2 glyphs are {} pixels wide, only up to 8 is supported",
                width
            )));
        }
        if glyph_size != height {
            return Err(Error::Font(format!(
                "PSF2 glyph size {} does not match height {}",
                glyph_size, height
            )));
        }

        let len = count.saturating_mul(height);
        let table = glyph_table(bytes, header_size, len)?;
        let font = Self::new(width, height, table)?;

        if flags & PSF2_HAS_UNICODE_TABLE == 0 {
            return Ok(font);
        }
        let unicode = psf2_unicode_table(&bytes[header_size + len..], count)?;
        Ok(font.with_unicode(unicode))
    }

    /// Read and parse a PSF font file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = Self::from_psf(&bytes)?;
        debug!(
            path = %path.display(),
            width = font.width,
            height = font.height,
            glyphs = font.glyph_count(),
            "loaded font"
        );
        Ok(font)
    }

    /// Glyph width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of glyphs in the table
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len() / self.height
    }

    /// The row bytes of the glyph for `c`, if the font has one
    pub fn glyph(&self, c: char) -> Option<&[u8]> {
        let index = match &self.unicode {
            Some(unicode) => *unicode.get(&c)?,
            None if c.is_ascii() => c as usize,
            None => return None,
        };
        let start = index.checked_mul(self.height)?;
        self.glyphs.get(start..start.checked_add(self.height)?)
    }

    /// Text grid (columns, rows) that fits in a surface of the given size
    pub fn grid_size(&self, width: usize, height: usize) -> (usize, usize) {
        (width / self.width, height / self.height)
    }

    /// Draw `c` with its top-left corner at pixel `(x, y)`.
    ///
    /// Set bits are painted `fg`, clear bits `bg`. Characters missing from
    /// the table are drawn as `'?'`, or as a blank cell if that is missing
    /// too.
    pub fn draw_glyph<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        c: char,
        x: usize,
        y: usize,
        fg: Rgb565,
        bg: Rgb565,
    ) {
        let glyph = self.glyph(c).or_else(|| self.glyph('?'));

        for row in 0..self.height {
            let mut bits = glyph.map_or(0, |g| g[row]);
            let py = y.saturating_add(row);
            for col in 0..self.width {
                let color = if bits & 0x01 != 0 { fg } else { bg };
                surface.write_pixel(x.saturating_add(col), py, color);
                bits >>= 1;
            }
        }
    }

    /// Draw `c` in text cell (`row`, `col`)
    pub fn draw_glyph_grid<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        c: char,
        row: usize,
        col: usize,
        fg: Rgb565,
        bg: Rgb565,
    ) {
        let x = col.saturating_mul(self.width);
        let y = row.saturating_mul(self.height);
        self.draw_glyph(surface, c, x, y, fg, bg);
    }

    /// Draw a string starting at pixel `(x, y)`.
    ///
    /// A glyph that would cross the right edge of the surface goes to the
    /// start of the next text line instead, one glyph height down and back at
    /// `x`. `'\n'` also starts a new line. No cursor is involved.
    pub fn draw_text<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: usize,
        y: usize,
        fg: Rgb565,
        bg: Rgb565,
    ) {
        if x >= surface.width() || y >= surface.height() {
            return;
        }

        let (mut px, mut py) = (x, y);
        for c in text.chars() {
            if c == '\n' {
                px = x;
                py = py.saturating_add(self.height);
                continue;
            }

            if px != x && px.saturating_add(self.width) > surface.width() {
                px = x;
                py = py.saturating_add(self.height);
            }

            self.draw_glyph(surface, c, px, py, fg, bg);
            px = px.saturating_add(self.width);
        }
    }
}

/// Copy `len` glyph bytes from `offset`, converting MSB-first rows to
/// LSB-first ones.
fn glyph_table(bytes: &[u8], offset: usize, len: usize) -> Result<Vec<u8>> {
    let end = offset.saturating_add(len);
    let rows = bytes
        .get(offset..end)
        .ok_or_else(|| Error::Font(format!("glyph data truncated ({} bytes needed)", end)))?;
    Ok(rows.iter().map(|row| row.reverse_bits()).collect())
}

/// PSF1 unicode table: per glyph, UCS-2 code points up to a 0xFFFF
/// separator. Sequences after 0xFFFE are skipped.
fn psf1_unicode_table(bytes: &[u8], count: usize) -> Result<HashMap<char, usize>> {
    let mut unicode = HashMap::new();
    let mut words = bytes
        .chunks_exact(2)
        .map(|w| u16::from_le_bytes([w[0], w[1]]));

    for index in 0..count {
        let mut in_sequence = false;
        loop {
            let word = words
                .next()
                .ok_or_else(|| Error::Font("PSF1 unicode table truncated".to_string()))?;
            match word {
                PSF1_SEPARATOR => break,
                PSF1_STARTSEQ => in_sequence = true,
                _ if in_sequence => {},
                _ => {
                    if let Some(c) = char::from_u32(word as u32) {
                        unicode.entry(c).or_insert(index);
                    }
                },
            }
        }
    }
    Ok(unicode)
}

/// PSF2 unicode table: per glyph, UTF-8 characters up to a 0xFF separator.
/// Sequences after 0xFE are skipped.
fn psf2_unicode_table(bytes: &[u8], count: usize) -> Result<HashMap<char, usize>> {
    let mut unicode = HashMap::new();
    let mut entries = bytes.split(|&b| b == PSF2_SEPARATOR);

    for index in 0..count {
        let entry = entries
            .next()
            .ok_or_else(|| Error::Font("PSF2 unicode table truncated".to_string()))?;
        let singles = entry.split(|&b| b == PSF2_STARTSEQ).next().unwrap_or_default();
        let text = std::str::from_utf8(singles)
            .map_err(|_| Error::Font(format!("bad UTF-8 in unicode entry {}", index)))?;
        for c in text.chars() {
            unicode.entry(c).or_insert(index);
        }
    }
    Ok(unicode)
}
