//! Drawing Core Module
//!
//! Device-independent drawing engine. This module contains:
//! - The packed RGB565 color model and blending
//! - Bounds-checked pixel access over any [`Surface`]
//! - Region buffers (capture, paste, blended paste)
//! - Primitive rasterization (spans, lines, filled rectangles)
//!
//! Drawing goes through the [`Surface`] trait. [`PixelBuffer`] is the only
//! surface that lives here; device-backed ones are in `crate::device`.

mod color;
pub mod raster;
mod region;
mod surface;

pub use color::Rgb565;
pub use region::Region;
pub use surface::{PixelBuffer, Surface};
