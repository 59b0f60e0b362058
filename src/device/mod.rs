//! Framebuffer devices
//!
//! Surfaces backed by real display memory. The drawing core never depends on
//! this module; it only sees the [`Surface`](crate::core::Surface) trait.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::Framebuffer;

/// Geometry reported by a framebuffer device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbInfo {
    /// Visible width in pixels
    pub width: usize,
    /// Visible height in pixels
    pub height: usize,
    pub bits_per_pixel: u32,
}

impl fmt::Display for FbInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {} bpp", self.width, self.height, self.bits_per_pixel)
    }
}
