//! Surface access
//!
//! A surface is a row-major grid of packed pixels with a fixed geometry.
//! Whoever provides it (a mapped framebuffer device, or a plain heap buffer)
//! only has to hand out its dimensions and its pixel slice; addressing and
//! bounds rejection live here.

use std::io::{self, Write};

use super::Rgb565;
use crate::error::{Error, Result};

/// A fixed-size, row-major grid of RGB565 pixels.
///
/// Implementors must keep `pixels().len() >= width() * height()` and must not
/// change their geometry while borrowed.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// The raw pixel array, row-major
    fn pixels(&self) -> &[Rgb565];

    /// The raw pixel array, row-major
    fn pixels_mut(&mut self) -> &mut [Rgb565];

    /// Whether `(x, y)` addresses a pixel of this surface
    fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Set one pixel. Coordinates outside the surface are ignored.
    fn write_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        if !self.contains(x, y) {
            return;
        }
        let index = y * self.width() + x;
        if let Some(pixel) = self.pixels_mut().get_mut(index) {
            *pixel = color;
        }
    }

    /// Get one pixel, or `None` outside the surface
    fn get_pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        if !self.contains(x, y) {
            return None;
        }
        self.pixels().get(y * self.width() + x).copied()
    }

    /// Get one pixel, or [`Rgb565::INVALID`] outside the surface
    fn read_pixel(&self, x: usize, y: usize) -> Rgb565 {
        self.get_pixel(x, y).unwrap_or(Rgb565::INVALID)
    }

    /// Fill the whole `width * height` extent with one color
    fn clear(&mut self, color: Rgb565) {
        let extent = self.width() * self.height();
        let pixels = self.pixels_mut();
        let extent = extent.min(pixels.len());
        pixels[..extent].fill(color);
    }
}

/// A heap-backed surface.
///
/// Used wherever there is no framebuffer device: tests, benchmarks and
/// headless rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
}

impl PixelBuffer {
    /// Create a black buffer.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows or cannot be allocated. Use
    /// [`PixelBuffer::try_new`] for sizes that come from outside.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
        }
    }

    /// Create a black buffer, failing on sizes that overflow or cannot be
    /// allocated
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(Error::TooLarge { width, height })?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, Rgb565::BLACK);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The pixels as raw native-endian bytes, as a 16 bpp device stores them
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the buffer as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width * 3);
        for line in self.pixels.chunks(self.width.max(1)) {
            row.clear();
            for pixel in line {
                let (r, g, b) = pixel.to_rgb888();
                row.extend_from_slice(&[r, g, b]);
            }
            out.write_all(&row)?;
        }
        out.flush()
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [Rgb565] {
        &mut self.pixels
    }
}
