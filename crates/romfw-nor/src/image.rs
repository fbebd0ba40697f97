//! Composite flash image assembly and inspection.
//!
//! Layout: `[firmware, 2 MiB][metadata, 2 MiB][ROM blocks...]`. Block 0 is
//! the firmware plus metadata, ROM data starts at block 1.

use tracing::{debug, warn};

use crate::constants::{
    BLOCK_SIZE, FILL_BYTE, FIRMWARE_REGION_SIZE, FIRST_ROM_BLOCK, FLASH_BLOCK_COUNT, HEADER_LEN,
    MAX_RECORDS, METADATA_REGION_SIZE, RECORD_LEN,
};
use crate::error::NorError;
use crate::header::MetaHeader;
use crate::record::MetaRecord;
use crate::rom::RomImage;
use crate::toc::{MetadataRegion, TocEntry};

/// Accumulates ROMs in flash order.
#[derive(Debug, Clone)]
pub struct NorImageBuilder {
    firmware: Vec<u8>,
    records: Vec<MetaRecord>,
    rom_data: Vec<u8>,
}

impl NorImageBuilder {
    /// Start an image from a firmware blob, padded with `0xFF` to 2 MiB.
    pub fn new(mut firmware: Vec<u8>) -> Result<Self, NorError> {
        if firmware.len() > FIRMWARE_REGION_SIZE {
            return Err(NorError::FirmwareTooLarge(firmware.len()));
        }
        firmware.resize(FIRMWARE_REGION_SIZE, FILL_BYTE);
        Ok(Self {
            firmware,
            records: Vec::new(),
            rom_data: Vec::new(),
        })
    }

    /// Place `rom` after every ROM added so far and return its record.
    pub fn add_rom(&mut self, rom: &RomImage) -> Result<&MetaRecord, NorError> {
        if self.records.len() >= MAX_RECORDS {
            return Err(NorError::MetadataOverflow(self.records.len() + 1));
        }

        let base_block = self.rom_data.len() / BLOCK_SIZE + FIRST_ROM_BLOCK;
        let record = rom.record(base_block)?;

        let end_block = base_block + rom.num_blocks();
        if end_block > FLASH_BLOCK_COUNT {
            warn!(
                rom = rom.name(),
                end_block, "ROM extends past the {FLASH_BLOCK_COUNT}-block flash"
            );
        }
        debug!(
            rom = rom.name(),
            base_block,
            blocks = rom.num_blocks(),
            "placed ROM"
        );

        self.rom_data.extend_from_slice(rom.data());
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[MetaRecord] {
        &self.records
    }

    /// Header and records, padded with `0xFF` to 2 MiB.
    pub fn metadata_region(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.records.len() * RECORD_LEN);
        for rec in &self.records {
            let mut buf = [0u8; RECORD_LEN];
            rec.encode_into(&mut buf);
            raw.extend_from_slice(&buf);
        }

        let mut hbuf = [0u8; HEADER_LEN];
        MetaHeader::for_records(&raw, self.records.len() as u32).encode_into(&mut hbuf);

        let mut region = Vec::with_capacity(METADATA_REGION_SIZE);
        region.extend_from_slice(&hbuf);
        region.extend_from_slice(&raw);
        region.resize(METADATA_REGION_SIZE, FILL_BYTE);
        region
    }

    /// Concatenate firmware, metadata and ROM data.
    pub fn build(self) -> Vec<u8> {
        let metadata = self.metadata_region();
        let mut image = self.firmware;
        image.reserve(metadata.len() + self.rom_data.len());
        image.extend_from_slice(&metadata);
        image.extend_from_slice(&self.rom_data);
        image
    }
}

/// Decode and validate the metadata of a complete flash image.
///
/// Besides the entry's own checks, every mapped block must exist in `image`.
pub fn inspect_image(image: &[u8]) -> Result<TocEntry, NorError> {
    let region = image
        .get(FIRMWARE_REGION_SIZE..FIRMWARE_REGION_SIZE + METADATA_REGION_SIZE)
        .ok_or(NorError::TooShort {
            need: FIRMWARE_REGION_SIZE + METADATA_REGION_SIZE,
            got: image.len(),
        })?;

    let entry = MetadataRegion::new(region).latest()?;
    entry.verify()?;

    let blocks = image.len() / BLOCK_SIZE;
    for rec in &entry.records {
        if let Some(block) = rec.blocks().find(|&b| b as usize >= blocks) {
            return Err(NorError::BlockOutOfRange { block, blocks });
        }
    }
    Ok(entry)
}
