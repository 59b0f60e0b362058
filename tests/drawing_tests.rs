//! Drawing engine tests
//!
//! Properties of colors, pixel access, region capture/paste and the line and
//! rectangle rasterizers, checked against an in-memory surface.

use fbdraw::core::{raster, PixelBuffer, Region, Rgb565, Surface};
use fbdraw::Error;
use proptest::prelude::*;

/// Fill a buffer with a recognizable pattern
fn patterned(width: usize, height: usize) -> PixelBuffer {
    let mut fb = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            fb.write_pixel(x, y, Rgb565((x * 31 + y * 1021) as u16));
        }
    }
    fb
}

fn lit(fb: &PixelBuffer) -> usize {
    fb.pixels().iter().filter(|&&p| p != Rgb565::BLACK).count()
}

proptest! {
    #[test]
    fn prop_channels_round_trip(r in 0u8..32, g in 0u8..64, b in 0u8..32) {
        let c = Rgb565::from_rgb(r, g, b);
        prop_assert_eq!(c.channels(), (r, g, b));
    }

    #[test]
    fn prop_out_of_range_channel_is_black(wide in 32u8.., wider in 64u8.., ok in 0u8..32) {
        prop_assert_eq!(Rgb565::from_rgb(wide, ok, ok), Rgb565::BLACK);
        prop_assert_eq!(Rgb565::from_rgb(ok, wider, ok), Rgb565::BLACK);
        prop_assert_eq!(Rgb565::from_rgb(ok, ok, wide), Rgb565::BLACK);
    }

    #[test]
    fn prop_blend_with_itself(raw in any::<u16>(), alpha in any::<u8>()) {
        let c = Rgb565(raw);
        prop_assert_eq!(Rgb565::blend(c, c, alpha), c);
    }

    #[test]
    fn prop_blend_extremes(src in any::<u16>(), dst in any::<u16>()) {
        let (src, dst) = (Rgb565(src), Rgb565(dst));
        prop_assert_eq!(Rgb565::blend(src, dst, 0), dst);
        prop_assert_eq!(Rgb565::blend(src, dst, 255), src);
    }

    #[test]
    fn prop_blend_stays_between(src in any::<u16>(), dst in any::<u16>(), alpha in any::<u8>()) {
        let (src, dst) = (Rgb565(src), Rgb565(dst));
        let mixed = Rgb565::blend(src, dst, alpha);
        let between = |m: u8, a: u8, b: u8| a.min(b) <= m && m <= a.max(b);
        prop_assert!(between(mixed.red(), src.red(), dst.red()));
        prop_assert!(between(mixed.green(), src.green(), dst.green()));
        prop_assert!(between(mixed.blue(), src.blue(), dst.blue()));
    }

    #[test]
    fn prop_capture_paste_is_identity(
        x0 in 0usize..24, y0 in 0usize..16,
        w in 0usize..24, h in 0usize..16,
    ) {
        let mut fb = patterned(24, 16);
        let before = fb.clone();
        let (x1, y1) = ((x0 + w).min(24), (y0 + h).min(16));

        let region = Region::capture(&fb, x0, y0, x1, y1).unwrap();
        prop_assert_eq!(region.len(), (x1 - x0) * (y1 - y0));
        region.paste(&mut fb, x0, y0);

        prop_assert_eq!(fb, before);
    }

    #[test]
    fn prop_blended_paste_alpha_zero_is_plain_paste(x in 0usize..30, y in 0usize..20) {
        let source = patterned(8, 8);
        let region = Region::capture(&source, 0, 0, 8, 8).unwrap();

        let mut plain = PixelBuffer::new(24, 16);
        plain.clear(Rgb565::CYAN);
        let mut blended = plain.clone();

        region.paste(&mut plain, x, y);
        region.paste_blended(&mut blended, x, y, 0);
        prop_assert_eq!(plain, blended);
    }

    #[test]
    fn prop_writes_outside_are_dropped(x in 0usize..64, y in 0usize..64, raw in any::<u16>()) {
        let mut fb = patterned(16, 12);
        let before = fb.clone();
        let inside = x < 16 && y < 12;

        fb.write_pixel(x, y, Rgb565(raw));

        if inside {
            prop_assert_eq!(fb.read_pixel(x, y), Rgb565(raw));
            prop_assert_eq!(fb.get_pixel(x, y), Some(Rgb565(raw)));
        } else {
            prop_assert_eq!(&fb, &before);
            prop_assert_eq!(fb.read_pixel(x, y), Rgb565::INVALID);
            prop_assert_eq!(fb.get_pixel(x, y), None);
        }
    }

    #[test]
    fn prop_line_hits_both_ends(x0 in 0usize..32, y0 in 0usize..32, x1 in 0usize..32, y1 in 0usize..32) {
        let mut fb = PixelBuffer::new(32, 32);
        raster::line(&mut fb, x0, y0, x1, y1, Rgb565::WHITE);

        prop_assert_eq!(fb.read_pixel(x0, y0), Rgb565::WHITE);
        prop_assert_eq!(fb.read_pixel(x1, y1), Rgb565::WHITE);

        // One pixel per step along the longer axis
        let major = x0.abs_diff(x1).max(y0.abs_diff(y1));
        prop_assert_eq!(lit(&fb), major + 1);
    }

    #[test]
    fn prop_line_is_symmetric_in_pixel_count(x0 in 0usize..32, y0 in 0usize..32, x1 in 0usize..32, y1 in 0usize..32) {
        let mut forward = PixelBuffer::new(32, 32);
        let mut backward = PixelBuffer::new(32, 32);
        raster::line(&mut forward, x0, y0, x1, y1, Rgb565::WHITE);
        raster::line(&mut backward, x1, y1, x0, y0, Rgb565::WHITE);
        prop_assert_eq!(lit(&forward), lit(&backward));
    }

    #[test]
    fn prop_line_clipped_to_small_surface(x0 in 0usize..96, y0 in 0usize..96, x1 in 0usize..96, y1 in 0usize..96) {
        let mut small = PixelBuffer::new(20, 14);
        let mut large = PixelBuffer::new(96, 96);
        raster::line(&mut small, x0, y0, x1, y1, Rgb565::WHITE);
        raster::line(&mut large, x0, y0, x1, y1, Rgb565::WHITE);

        for y in 0..14 {
            for x in 0..20 {
                prop_assert_eq!(small.read_pixel(x, y), large.read_pixel(x, y));
            }
        }
    }

    #[test]
    fn prop_rect_area(x in 0usize..40, y in 0usize..30, w in 0usize..40, h in 0usize..30) {
        let mut fb = PixelBuffer::new(32, 24);
        raster::rect(&mut fb, x, y, w, h, Rgb565::RED);

        let visible_w = (x + w).min(32).saturating_sub(x);
        let visible_h = (y + h).min(24).saturating_sub(y);
        prop_assert_eq!(lit(&fb), visible_w * visible_h);
    }
}

#[test]
fn test_edge_pixels() {
    let mut fb = PixelBuffer::new(320, 240);
    fb.write_pixel(319, 239, Rgb565::RED);
    fb.write_pixel(320, 239, Rgb565::GREEN);
    fb.write_pixel(319, 240, Rgb565::GREEN);

    assert_eq!(fb.read_pixel(319, 239), Rgb565::RED);
    assert_eq!(fb.read_pixel(320, 239), Rgb565::INVALID);
    assert_eq!(fb.pixels().iter().filter(|&&p| p == Rgb565::GREEN).count(), 0);
}

#[test]
fn test_line_shallow_slope() {
    let mut fb = PixelBuffer::new(16, 8);
    raster::line(&mut fb, 0, 0, 10, 5, Rgb565::WHITE);

    let mut last_y = 0;
    for x in 0..=10 {
        let ys: Vec<usize> = (0..8)
            .filter(|&y| fb.read_pixel(x, y) == Rgb565::WHITE)
            .collect();
        assert_eq!(ys.len(), 1, "column {}", x);
        assert!(ys[0] >= last_y && ys[0] - last_y <= 1);
        last_y = ys[0];
    }
    assert_eq!(last_y, 5);
    assert_eq!(lit(&fb), 11);
}

#[test]
fn test_rect_pixel_count() {
    let mut fb = PixelBuffer::new(20, 20);
    raster::rect(&mut fb, 2, 3, 5, 8, Rgb565::BLUE);
    assert_eq!(lit(&fb), 40);
    assert_eq!(fb.read_pixel(6, 10), Rgb565::BLUE);
    assert_eq!(fb.read_pixel(7, 10), Rgb565::BLACK);
    assert_eq!(fb.read_pixel(6, 11), Rgb565::BLACK);
}

#[test]
fn test_capture_swapped_corners() {
    let fb = PixelBuffer::new(8, 8);
    let result = Region::capture(&fb, 5, 0, 2, 4);
    assert!(matches!(result, Err(Error::InvalidRegion { .. })));
}

#[test]
fn test_capture_off_surface_then_paste() {
    let fb = patterned(8, 8);
    let region = Region::capture(&fb, 6, 6, 10, 10).unwrap();
    assert_eq!(region.get(0, 0), Some(fb.read_pixel(6, 6)));
    assert_eq!(region.get(3, 3), Some(Rgb565::INVALID));

    // Partially off-screen paste keeps its visible part
    let mut target = PixelBuffer::new(8, 8);
    region.paste(&mut target, 6, 6);
    assert_eq!(target.read_pixel(7, 7), fb.read_pixel(7, 7));
}

#[test]
fn test_blended_paste_alpha_full_keeps_screen() {
    let source = patterned(8, 8);
    let region = Region::capture(&source, 0, 0, 8, 8).unwrap();

    let mut fb = PixelBuffer::new(8, 8);
    fb.clear(Rgb565::MAGENTA);
    let before = fb.clone();
    region.paste_blended(&mut fb, 0, 0, 255);
    assert_eq!(fb, before);
}
