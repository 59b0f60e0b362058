//! Primitive rasterization
//!
//! Lines and filled rectangles in a single color. Straight spans are clipped
//! against the surface once per call and filled directly; the general line
//! goes through [`Surface::write_pixel`] so each of its pixels is bounds
//! checked on its own.

use super::{Rgb565, Surface};

/// Horizontal span of `w` pixels starting at `(x, y)` going right
pub fn hline<S: Surface + ?Sized>(surface: &mut S, x: usize, y: usize, w: usize, color: Rgb565) {
    let width = surface.width();
    if x >= width || y >= surface.height() {
        return;
    }

    let end = x.saturating_add(w).min(width);
    let row = y * width;
    if let Some(span) = surface.pixels_mut().get_mut(row + x..row + end) {
        span.fill(color);
    }
}

/// Vertical span of `h` pixels starting at `(x, y)` going down
pub fn vline<S: Surface + ?Sized>(surface: &mut S, x: usize, y: usize, h: usize, color: Rgb565) {
    if x >= surface.width() {
        return;
    }

    let end = y.saturating_add(h).min(surface.height());
    for py in y..end {
        surface.write_pixel(x, py, color);
    }
}

/// Line from `(x0, y0)` to `(x1, y1)`, both end points included.
///
/// Integer Bresenham, walking the major axis one pixel at a time and keeping
/// the decision variable `d = 2 * dminor - dmajor`. Works in all eight
/// octants. Only the steps whose major coordinate is on the surface are
/// walked; the walk enters mid-line with the minor offset and decision
/// variable it would have had by then.
pub fn line<S: Surface + ?Sized>(
    surface: &mut S,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    color: Rgb565,
) {
    let (x0, y0, x1, y1) = (coord(x0), coord(y0), coord(x1), coord(y1));

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x1 >= x0 { 1 } else { -1 };
    let sy = if y1 >= y0 { 1 } else { -1 };

    let steep = dy > dx;
    let (major0, minor0, smajor, sminor, dmajor, dminor, limit) = if steep {
        (y0, x0, sy, sx, dy, dx, coord(surface.height()))
    } else {
        (x0, y0, sx, sy, dx, dy, coord(surface.width()))
    };

    // Steps that land inside the surface along the major axis
    let (first, last) = if smajor > 0 {
        (0, dmajor.min(limit - 1 - major0))
    } else {
        ((major0 - (limit - 1)).max(0), dmajor.min(major0))
    };
    if first > last {
        return;
    }

    // Minor offset after `first` steps: round(first * dminor / dmajor), ties down
    let offset = if dmajor == 0 {
        0
    } else {
        let (k, dm, dj) = (first as i128, dminor as i128, dmajor as i128);
        ((2 * k * dm + dj - 1) / (2 * dj)) as i64
    };
    let mut d = (2 * dminor as i128 * (first as i128 + 1) - dmajor as i128 * (2 * offset as i128 + 1)) as i64;

    let mut major = major0 + smajor * first;
    let mut minor = minor0 + sminor * offset;

    for _ in first..=last {
        // Coordinates never go negative: every step moves towards an end point
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        surface.write_pixel(x as usize, y as usize, color);

        if d > 0 {
            minor += sminor;
            d -= 2 * dmajor;
        }
        d += 2 * dminor;
        major += smajor;
    }
}

/// Filled `w` x `h` rectangle with its top-left corner at `(x, y)`
pub fn rect<S: Surface + ?Sized>(
    surface: &mut S,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: Rgb565,
) {
    let end = y.saturating_add(h).min(surface.height());
    for row in y..end {
        hline(surface, x, row, w, color);
    }
}

// Far-away end points are pulled in so the walk stays in i64.
fn coord(v: usize) -> i64 {
    v.min(i32::MAX as usize) as i64
}
