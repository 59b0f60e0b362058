//! Application glue module
//!
//! Configuration, command line options and the demo programs shared by the
//! binaries.

mod config;
mod demo;

pub use config::{CliArgs, Config, ConfigError};
pub use demo::{load_font, run, Demo};
