//! Error types

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors raised by the allocation-bearing and device-facing operations.
///
/// Pixel-level drawing never fails: out-of-bounds writes are dropped and
/// out-of-bounds reads return [`Rgb565::INVALID`](crate::core::Rgb565::INVALID).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid region: ({x0}, {y0}) - ({x1}, {y1})")]
    InvalidRegion {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    },

    #[error("Failed to allocate region buffer: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("Invalid font: {0}")]
    Font(String),

    #[error("Unsupported color depth: {0} bits per pixel (expected 16)")]
    UnsupportedDepth(u32),

    #[error("Unsupported framebuffer layout: {0}")]
    UnsupportedLayout(String),

    #[error("Surface of {width}x{height} pixels is too large")]
    TooLarge { width: usize, height: usize },

    #[error("Framebuffer device error: {0}")]
    Device(#[source] nix::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for fbdraw operations
pub type Result<T> = std::result::Result<T, Error>;
