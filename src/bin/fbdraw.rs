//! fbdraw
//!
//! Draws one of the demo pictures straight onto a Linux framebuffer device.
//! The text demo reads what to print from stdin.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fbdraw::app::{self, CliArgs, Config, Demo};
use fbdraw::device::Framebuffer;

#[derive(Parser, Debug)]
#[command(name = "fbdraw")]
#[command(version)]
#[command(about = "Draw on a Linux framebuffer", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CliArgs,

    /// Framebuffer device (defaults to /dev/fb0)
    #[arg(short, long, value_name = "DEVICE")]
    device: Option<PathBuf>,

    /// Print the device geometry and exit
    #[arg(long)]
    info: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_with_args(&args.common)?;
    if let Some(device) = args.device {
        config.device = device;
    }

    let mut fb = Framebuffer::open(&config.device)?;
    println!("{}: {}", config.device.display(), fb.info());
    if args.info {
        return Ok(());
    }

    let mut text = String::new();
    if args.common.demo == Demo::Text {
        io::stdin().read_to_string(&mut text)?;
    }

    app::run(&mut fb, args.common.demo, &config, &text)?;
    Ok(())
}
