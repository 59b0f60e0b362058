//! Region buffers
//!
//! A region is an owned snapshot of a rectangle of surface pixels. It is
//! independent of the surface once captured and can be pasted back anywhere,
//! either opaquely or blended with what is already on screen.

use tracing::trace;

use super::{Rgb565, Surface};
use crate::error::{Error, Result};

/// An owned rectangle of pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
}

impl Region {
    /// Copy the half-open rectangle `[x0, x1) x [y0, y1)` out of `surface`.
    ///
    /// Pixels of the rectangle that fall outside the surface are stored as
    /// [`Rgb565::INVALID`]. Fails if the corners are swapped or if the buffer
    /// cannot be allocated.
    pub fn capture<S: Surface + ?Sized>(
        surface: &S,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<Self> {
        if x1 < x0 || y1 < y0 {
            return Err(Error::InvalidRegion { x0, y0, x1, y1 });
        }

        let width = x1 - x0;
        let height = y1 - y0;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(width.saturating_mul(height))?;

        for y in y0..y1 {
            for x in x0..x1 {
                pixels.push(surface.read_pixel(x, y));
            }
        }

        trace!(x0, y0, width, height, "captured region");

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`)
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The captured pixels, row-major
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Pixel at `(x, y)` relative to the region's top-left corner
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    fn rows(&self) -> impl Iterator<Item = (usize, &[Rgb565])> {
        self.pixels.chunks(self.width.max(1)).enumerate()
    }

    /// Draw the region with its top-left corner at `(x, y)`.
    ///
    /// Pixels that land outside the surface are dropped one by one, so a
    /// partially off-screen paste still draws its visible part.
    pub fn paste<S: Surface + ?Sized>(&self, surface: &mut S, x: usize, y: usize) {
        for (row, line) in self.rows() {
            let py = y.saturating_add(row);
            for (col, &pixel) in line.iter().enumerate() {
                surface.write_pixel(x.saturating_add(col), py, pixel);
            }
        }
    }

    /// Draw the region blended with the pixels already on the surface.
    ///
    /// The surface pixel is the blend source and the stored pixel the
    /// destination: `alpha == 0` reproduces the region, `alpha == 255`
    /// leaves the surface as it was.
    pub fn paste_blended<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: usize,
        y: usize,
        alpha: u8,
    ) {
        for (row, line) in self.rows() {
            let py = y.saturating_add(row);
            for (col, &pixel) in line.iter().enumerate() {
                let px = x.saturating_add(col);
                let under = surface.read_pixel(px, py);
                surface.write_pixel(px, py, Rgb565::blend(under, pixel, alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PixelBuffer;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut fb = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                fb.write_pixel(x, y, Rgb565((y * width + x) as u16));
            }
        }
        fb
    }

    #[test]
    fn test_capture_dimensions() {
        let fb = gradient(16, 16);
        let region = Region::capture(&fb, 2, 3, 7, 5).unwrap();

        assert_eq!(region.width(), 5);
        assert_eq!(region.height(), 2);
        assert_eq!(region.len(), 10);
        assert_eq!(region.get(0, 0), Some(Rgb565(3 * 16 + 2)));
        assert_eq!(region.get(4, 1), Some(Rgb565(4 * 16 + 6)));
        assert_eq!(region.get(5, 0), None);
    }

    #[test]
    fn test_capture_rejects_swapped_corners() {
        let fb = gradient(8, 8);
        assert!(matches!(
            Region::capture(&fb, 5, 0, 2, 4),
            Err(Error::InvalidRegion { x0: 5, x1: 2, .. })
        ));
        assert!(Region::capture(&fb, 0, 5, 4, 2).is_err());
    }

    #[test]
    fn test_capture_empty() {
        let fb = gradient(8, 8);
        let region = Region::capture(&fb, 3, 3, 3, 6).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.height(), 3);

        // Pasting nothing is harmless
        let mut target = PixelBuffer::new(8, 8);
        region.paste(&mut target, 0, 0);
        assert_eq!(target, PixelBuffer::new(8, 8));
    }

    #[test]
    fn test_capture_off_surface_reads_sentinel() {
        let fb = gradient(4, 4);
        let region = Region::capture(&fb, 2, 2, 6, 3).unwrap();
        assert_eq!(region.get(1, 0), Some(Rgb565(2 * 4 + 3)));
        assert_eq!(region.get(2, 0), Some(Rgb565::INVALID));
        assert_eq!(region.get(3, 0), Some(Rgb565::INVALID));
    }

    #[test]
    fn test_paste_same_origin_round_trip() {
        let fb = gradient(20, 10);
        let region = Region::capture(&fb, 4, 2, 15, 9).unwrap();

        let mut target = fb.clone();
        target.clear(Rgb565::BLACK);
        region.paste(&mut target, 4, 2);

        for y in 0..10 {
            for x in 0..20 {
                let inside = (4..15).contains(&x) && (2..9).contains(&y);
                let expected = if inside { fb.read_pixel(x, y) } else { Rgb565::BLACK };
                assert_eq!(target.read_pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_paste_clips_per_pixel() {
        let mut fb = PixelBuffer::new(4, 4);
        let mut source = PixelBuffer::new(3, 3);
        source.clear(Rgb565::RED);
        let region = Region::capture(&source, 0, 0, 3, 3).unwrap();

        region.paste(&mut fb, 2, 2);

        assert_eq!(fb.read_pixel(2, 2), Rgb565::RED);
        assert_eq!(fb.read_pixel(3, 3), Rgb565::RED);
        assert_eq!(fb.read_pixel(1, 1), Rgb565::BLACK);
        let red = fb.pixels().iter().filter(|&&p| p == Rgb565::RED).count();
        assert_eq!(red, 4);
    }

    #[test]
    fn test_paste_blended_direction() {
        let mut source = PixelBuffer::new(2, 2);
        source.clear(Rgb565::BLUE);
        let region = Region::capture(&source, 0, 0, 2, 2).unwrap();

        // Alpha 0 reproduces the stored image
        let mut fb = PixelBuffer::new(2, 2);
        fb.clear(Rgb565::RED);
        region.paste_blended(&mut fb, 0, 0, 0);
        assert!(fb.pixels().iter().all(|&p| p == Rgb565::BLUE));

        // Alpha 255 keeps what was on screen
        let mut fb = PixelBuffer::new(2, 2);
        fb.clear(Rgb565::RED);
        region.paste_blended(&mut fb, 0, 0, 255);
        assert!(fb.pixels().iter().all(|&p| p == Rgb565::RED));

        // Half way mixes both
        let mut fb = PixelBuffer::new(2, 2);
        fb.clear(Rgb565::RED);
        region.paste_blended(&mut fb, 0, 0, 127);
        let mixed = fb.read_pixel(0, 0);
        assert_eq!(mixed, Rgb565::blend(Rgb565::RED, Rgb565::BLUE, 127));
        assert!(mixed.red() > 0 && mixed.blue() > 0);
    }
}
