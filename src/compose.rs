//! Demo compositions
//!
//! Fixed pictures built only from the public drawing operations. They are
//! what the binaries put on screen and a quick visual check that every part
//! of the engine works on a given device.

use crate::core::{raster, Region, Rgb565, Surface};
use crate::error::Result;

/// A Piet Mondrian style grid of colored blocks and black bars.
///
/// Clears the whole surface first. Laid out for displays of at least
/// 320x240; on smaller surfaces the picture is simply cut off.
pub fn mondrian<S: Surface + ?Sized>(surface: &mut S) {
    let (width, height) = (surface.width(), surface.height());

    surface.clear(Rgb565::WHITE);

    raster::rect(surface, 35, 50, 30, 50, Rgb565::YELLOW);
    raster::rect(surface, 135, 50, 65, 50, Rgb565::RED);
    raster::rect(surface, 135, 185, 65, 105, Rgb565::BLUE);

    for x in [35, 135, 200] {
        raster::vline(surface, x, 0, height, Rgb565::BLACK);
    }
    raster::vline(surface, 65, 50, 50, Rgb565::BLACK);

    for y in [50, 100, 185, 290] {
        raster::hline(surface, 0, y, width, Rgb565::BLACK);
    }
}

/// Copy the top-left `size` x `size` block and paste it back `count` times
/// along the diagonal, `step` pixels apart, blended at `alpha`.
pub fn translucent_trail<S: Surface + ?Sized>(
    surface: &mut S,
    size: usize,
    step: usize,
    count: usize,
    alpha: u8,
) -> Result<()> {
    let block = Region::capture(&*surface, 0, 0, size, size)?;
    for i in 0..count {
        let offset = i.saturating_mul(step);
        block.paste_blended(surface, offset, offset, alpha);
    }
    Ok(())
}
