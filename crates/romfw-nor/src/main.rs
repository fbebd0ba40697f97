use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use romfw_nor::image::inspect_image;
use romfw_nor::pack_files;

/// NOR flash image packer
#[derive(Parser, Debug)]
#[command(name = "nor-manager")]
#[command(
    about = "Generates flash metadata for a set of ROMs and appends it to a firmware image",
    long_about = None
)]
struct Args {
    /// ROM firmware image path
    #[arg(long)]
    fwimage: PathBuf,

    /// ROM files to append, in flash order
    #[arg(long, required = true, num_args = 1..)]
    roms: Vec<PathBuf>,

    /// Output image file
    #[arg(long)]
    output: PathBuf,

    /// Re-read the written image and validate its metadata
    #[arg(long)]
    verify: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let size = pack_files(&args.fwimage, &args.roms, &args.output)
        .with_context(|| format!("failed to build {}", args.output.display()))?;
    info!("wrote {} ({} bytes)", args.output.display(), size);

    if args.verify {
        let image = fs::read(&args.output)
            .with_context(|| format!("failed to read back {}", args.output.display()))?;
        let entry = inspect_image(&image).context("metadata verification failed")?;
        for rec in &entry.records {
            let blocks: Vec<u8> = rec.blocks().collect();
            info!(
                "{} code={} type={:#04x} blocks={:?}",
                rec.name(),
                String::from_utf8_lossy(&rec.game_code),
                rec.cart_type,
                blocks
            );
        }
        info!("metadata OK, checksum {:#010x}", entry.header.checksum);
    }

    Ok(())
}
