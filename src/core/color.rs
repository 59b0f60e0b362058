//! Packed 16-bit color
//!
//! Colors are stored exactly as a 16 bpp framebuffer expects them: 5 bits of
//! red, 6 bits of green and 5 bits of blue, red in the most significant bits.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A packed RGB565 color
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const DARK_RED: Rgb565 = Rgb565(0x7800);
    pub const DARK_GREEN: Rgb565 = Rgb565(0x03E0);
    pub const DARK_BLUE: Rgb565 = Rgb565(0x000F);
    pub const DARK_YELLOW: Rgb565 = Rgb565(0x7BE0);
    pub const DARK_MAGENTA: Rgb565 = Rgb565(0x780F);
    pub const DARK_CYAN: Rgb565 = Rgb565(0x03EF);
    pub const DARK_GREY: Rgb565 = Rgb565(0x39E7);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const MAGENTA: Rgb565 = Rgb565(0xF81F);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);
    pub const GREY: Rgb565 = Rgb565(0x7BEF);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);

    /// Returned by out-of-bounds reads. Shares its bits with `WHITE`, so it
    /// only means "no pixel here" where a read is known to have missed.
    pub const INVALID: Rgb565 = Rgb565(u16::MAX);

    /// Pack 5-bit red, 6-bit green and 5-bit blue channels.
    ///
    /// Any channel out of range yields black instead of mixing stray bits
    /// into the neighbouring channel.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        if r >= 32 || g >= 64 || b >= 32 {
            return Self::BLACK;
        }
        Self(((r as u16) << 11) | ((g as u16) << 5) | b as u16)
    }

    /// Red channel (0-31)
    pub const fn red(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    /// Green channel (0-63)
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue channel (0-31)
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// All three channels at their native depth
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }

    /// Linear interpolation from `dst` towards `src`.
    ///
    /// Each channel is `(dst * (255 - alpha) + src * alpha) / 255` with
    /// truncating division, so `alpha == 0` gives back `dst` and
    /// `alpha == 255` lands on `src`.
    pub fn blend(src: Rgb565, dst: Rgb565, alpha: u8) -> Rgb565 {
        let a = alpha as u32;
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((d as u32 * inv + s as u32 * a) / 255) as u16;

        let r = mix(src.red(), dst.red());
        let g = mix(src.green(), dst.green());
        let b = mix(src.blue(), dst.blue());

        Rgb565((r << 11) | (g << 5) | b)
    }

    /// Look up one of the 15 named colors; every other index is white.
    pub const fn palette(index: u8) -> Rgb565 {
        match index {
            0 => Self::BLACK,
            1 => Self::DARK_RED,
            2 => Self::DARK_GREEN,
            3 => Self::DARK_BLUE,
            4 => Self::DARK_YELLOW,
            5 => Self::DARK_MAGENTA,
            6 => Self::DARK_CYAN,
            7 => Self::DARK_GREY,
            8 => Self::RED,
            9 => Self::GREEN,
            10 => Self::BLUE,
            11 => Self::YELLOW,
            12 => Self::MAGENTA,
            13 => Self::CYAN,
            14 => Self::GREY,
            _ => Self::WHITE,
        }
    }

    /// Expand to 8 bits per channel (for image export)
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let (r, g, b) = self.channels();
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Rgb565(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}
