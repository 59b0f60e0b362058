//! Text Module
//!
//! Bitmap-font text on top of the drawing core:
//! - Glyph tables and PSF font loading
//! - Glyph drawing at pixel or grid positions, and free-standing strings
//! - A cursor-driven console with wrapping and scrolling

mod console;
mod cursor;
mod font;

pub use console::Console;
pub use cursor::Cursor;
pub use font::Font;
