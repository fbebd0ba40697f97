//! NOR flash image packer.
//!
//! Lays out a firmware image and a list of ROMs the way the firmware's flash
//! manager expects them, with a metadata TOC describing where each ROM lives.

pub mod constants;
pub mod error;
pub mod header;
pub mod image;
pub mod record;
pub mod rom;
pub mod toc;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::NorError;
use crate::image::NorImageBuilder;
use crate::rom::RomImage;

/// Pack `firmware` and `roms` (in order) into one image.
pub fn pack(firmware: Vec<u8>, roms: &[RomImage]) -> Result<Vec<u8>, NorError> {
    let mut builder = NorImageBuilder::new(firmware)?;
    for rom in roms {
        let record = builder.add_rom(rom)?;
        info!(
            rom = rom.name(),
            game_code = %String::from_utf8_lossy(&record.game_code),
            blocks = record.num_blocks,
            first_block = record.block_map[0],
            "added ROM"
        );
    }
    Ok(builder.build())
}

/// Read the firmware and ROM files, pack them and write the image to `output`,
/// replacing any existing file. Returns the image size in bytes.
pub fn pack_files<P: AsRef<Path>>(
    firmware: impl AsRef<Path>,
    roms: &[P],
    output: impl AsRef<Path>,
) -> Result<usize, NorError> {
    let firmware = fs::read(firmware)?;
    let roms = roms
        .iter()
        .map(RomImage::from_file)
        .collect::<Result<Vec<_>, _>>()?;

    let image = pack(firmware, &roms)?;
    fs::write(output, &image)?;
    Ok(image.len())
}
