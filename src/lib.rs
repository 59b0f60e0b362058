//! fbdraw
//!
//! A software rasterizer that draws straight into a linear 16-bit (RGB565)
//! pixel buffer, such as a memory-mapped Linux framebuffer. No GPU, no
//! window system, no scene graph. This crate provides:
//!
//! - `core`: packed colors and blending, pixel access, region capture/paste,
//!   lines and rectangles
//! - `text`: bitmap fonts, glyph drawing and a scrolling text console
//! - `compose`: demo pictures built from the above
//! - `device`: the Linux framebuffer device as a drawing surface
//! - `app`: configuration, command line options and the demo programs run
//!   by the binaries

pub mod app;
pub mod compose;
pub mod core;
pub mod device;
pub mod error;
pub mod text;

pub use error::{Error, Result};
