//! Configuration for the fbdraw binaries
//!
//! Precedence, highest first: command line, `FBDRAW_*` environment
//! variables, the JSON config file, built-in defaults.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Demo;
use crate::core::Rgb565;

/// Command line options shared by both binaries
#[derive(clap::Args, Debug, Clone)]
pub struct CliArgs {
    /// Demo to draw
    #[arg(value_enum, default_value_t = Demo::Mondrian)]
    pub demo: Demo,

    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// PSF console font for the text demo
    #[arg(short, long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Text color as a palette index (0-15)
    #[arg(long, value_name = "INDEX")]
    pub fg: Option<u8>,

    /// Text background as a palette index (0-15)
    #[arg(long, value_name = "INDEX")]
    pub bg: Option<u8>,

    /// Blend factor for the blend demo (0 keeps the copy, 255 keeps the screen)
    #[arg(short, long)]
    pub alpha: Option<u8>,
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Framebuffer device
    pub device: PathBuf,
    /// PSF console font used for text output (built-in 8x8 font if unset)
    pub font: Option<PathBuf>,
    /// Text color (palette index)
    pub foreground: u8,
    /// Text background color (palette index)
    pub background: u8,
    /// Blend factor for the translucent paste demo (0-255)
    pub alpha: u8,
    /// Side of the square block copied by the translucent paste demo
    pub blend_size: usize,
    /// Pixel offset between successive translucent pastes
    pub blend_step: usize,
    /// Number of translucent pastes
    pub blend_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            font: None,
            foreground: 15,
            background: 0,
            alpha: 127,
            blend_size: 100,
            blend_step: 10,
            blend_count: 10,
        }
    }
}

impl Config {
    /// Load configuration with full precedence
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(),
        };

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/fbdraw/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                    },
                }
            }
        }
        Self::default()
    }

    fn apply_env_vars(&mut self) {
        if let Ok(val) = env::var("FBDRAW_DEVICE") {
            self.device = PathBuf::from(val);
        }
        if let Ok(val) = env::var("FBDRAW_FONT") {
            self.font = Some(PathBuf::from(val));
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(font) = &args.font {
            self.font = Some(font.clone());
        }
        if let Some(fg) = args.fg {
            self.foreground = fg;
        }
        if let Some(bg) = args.bg {
            self.background = bg;
        }
        if let Some(alpha) = args.alpha {
            self.alpha = alpha;
        }
    }

    /// Check values that the drawing code would otherwise quietly accept
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, index) in [("foreground", self.foreground), ("background", self.background)] {
            if index > 15 {
                return Err(ConfigError::Invalid {
                    field,
                    message: format!("palette index {} is out of range 0-15", index),
                });
            }
        }
        if self.blend_count > 0 && self.blend_size == 0 {
            return Err(ConfigError::Invalid {
                field: "blend_size",
                message: "must be at least 1 when blend_count is set".to_string(),
            });
        }
        Ok(())
    }

    /// Text foreground as a packed color
    pub fn foreground_color(&self) -> Rgb565 {
        Rgb565::palette(self.foreground)
    }

    /// Text background as a packed color
    pub fn background_color(&self) -> Rgb565 {
        Rgb565::palette(self.background)
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("fbdraw"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}
