use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use romfw_icon::{ConvertMode, convert_file};

/// Icon sheet converter
#[derive(Parser, Debug)]
#[command(name = "iconcv")]
#[command(about = "Converts a 16x16 icon sprite sheet into C arrays", long_about = None)]
struct Args {
    /// PNG sprite sheet, one 16x16 icon per column
    image: PathBuf,

    /// Treat the sheet as pre-quantized: keep colors as-is and use the short catalog
    #[arg(long)]
    raw: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the generated source, keep logs on stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mode = if args.raw {
        ConvertMode::Raw
    } else {
        ConvertMode::Rounded
    };

    let source = convert_file(&args.image, mode)
        .with_context(|| format!("failed to convert {}", args.image.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(source.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
