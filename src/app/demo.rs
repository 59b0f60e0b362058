//! Demo programs shared by the binaries

use tracing::info;

use super::Config;
use crate::compose;
use crate::core::{Rgb565, Surface};
use crate::error::Result;
use crate::text::{Console, Font};

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// Colored blocks and black bars
    Mondrian,
    /// Translucent copies of the top-left corner along the diagonal
    Blend,
    /// Text from stdin through the scrolling console
    Text,
}

/// Load the configured font, or the built-in one if none is set
pub fn load_font(config: &Config) -> Result<Font> {
    match config.font.as_deref() {
        Some(path) => Font::load(path),
        None => Ok(Font::builtin()),
    }
}

/// Draw `demo` onto `surface`. `text` is only used by [`Demo::Text`].
pub fn run<S: Surface + ?Sized>(surface: &mut S, demo: Demo, config: &Config, text: &str) -> Result<()> {
    info!(?demo, width = surface.width(), height = surface.height(), "running demo");

    match demo {
        Demo::Mondrian => compose::mondrian(surface),
        Demo::Blend => compose::translucent_trail(
            surface,
            config.blend_size,
            config.blend_step,
            config.blend_count,
            config.alpha,
        )?,
        Demo::Text => {
            let font = load_font(config)?;
            surface.clear(Rgb565::BLACK);
            let mut console = Console::new(&font);
            console.put_text(
                surface,
                text,
                config.foreground_color(),
                config.background_color(),
            );
            info!(row = console.cursor().row, col = console.cursor().col, "text written");
        },
    }

    Ok(())
}
