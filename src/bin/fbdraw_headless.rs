//! fbdraw headless runner
//!
//! Renders a demo into an in-memory pixel buffer and writes it out as a
//! binary PPM image, for machines without a framebuffer and for checking
//! output by eye.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fbdraw::app::{self, CliArgs, Config, Demo};
use fbdraw::compose;
use fbdraw::core::PixelBuffer;

#[derive(Parser, Debug)]
#[command(name = "fbdraw-headless")]
#[command(version)]
#[command(about = "Render fbdraw demos to a PPM image", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CliArgs,

    /// Surface width in pixels
    #[arg(long, default_value_t = 320)]
    width: usize,

    /// Surface height in pixels
    #[arg(long, default_value_t = 240)]
    height: usize,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
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
    let config = Config::load_with_args(&args.common)?;
    let mut buffer = PixelBuffer::try_new(args.width, args.height)?;

    let mut text = String::new();
    match args.common.demo {
        Demo::Text => {
            io::stdin().read_to_string(&mut text)?;
        },
        // Nothing on screen yet to blend over
        Demo::Blend => compose::mondrian(&mut buffer),
        Demo::Mondrian => {},
    }

    app::run(&mut buffer, args.common.demo, &config, &text)?;

    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            buffer.write_ppm(&mut out)?;
            out.flush()?;
            info!(path = %path.display(), "wrote image");
        },
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            buffer.write_ppm(&mut out)?;
            out.flush()?;
        },
    }

    Ok(())
}
