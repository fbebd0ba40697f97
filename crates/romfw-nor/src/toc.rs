//! Metadata region reader.
//!
//! The region holds one or more TOC entries back to back, each a
//! [`MetaHeader`] followed by `rom_count` records. The firmware appends a new
//! entry on every update, so the last entry with a valid magic is current.

use tracing::debug;

use crate::constants::{FLASH_BLOCK_COUNT, HEADER_LEN, MAX_RECORDS, RECORD_LEN};
use crate::error::NorError;
use crate::header::{MetaHeader, checksum};
use crate::record::MetaRecord;

/// One decoded TOC entry.
#[derive(Debug, Clone)]
pub struct TocEntry {
    /// Byte offset of the header inside the metadata region.
    pub offset: usize,
    pub header: MetaHeader,
    pub records: Vec<MetaRecord>,
    raw_records: Vec<u8>,
}

impl TocEntry {
    pub fn decode(region: &[u8], offset: usize) -> Result<Self, NorError> {
        let buf = region.get(offset..).unwrap_or_default();
        let header = MetaHeader::decode(buf)?;

        let count = header.rom_count as usize;
        if count > MAX_RECORDS {
            return Err(NorError::MetadataOverflow(count));
        }
        let need = HEADER_LEN + count * RECORD_LEN;
        let raw_records = buf
            .get(HEADER_LEN..need)
            .ok_or(NorError::TooShort {
                need,
                got: buf.len(),
            })?
            .to_vec();

        let records = raw_records
            .chunks_exact(RECORD_LEN)
            .map(MetaRecord::decode)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            offset,
            header,
            records,
            raw_records,
        })
    }

    /// Size of the header plus its records.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.raw_records.len()
    }

    /// Check the checksum and that no block is claimed by two records.
    pub fn verify(&self) -> Result<(), NorError> {
        let computed = checksum(&self.raw_records, self.header.rom_count);
        if computed != self.header.checksum {
            return Err(NorError::ChecksumMismatch {
                stored: self.header.checksum,
                computed,
            });
        }

        let mut used = [false; u8::MAX as usize + 1];
        for block in self.records.iter().flat_map(MetaRecord::blocks) {
            let slot = &mut used[block as usize];
            if *slot {
                return Err(NorError::BlockReused(block));
            }
            *slot = true;
        }

        let highest = self.records.iter().flat_map(MetaRecord::blocks).max();
        if let Some(block) = highest.filter(|&b| b as usize >= FLASH_BLOCK_COUNT) {
            debug!(block, "entry maps blocks beyond the physical flash");
        }
        Ok(())
    }
}

/// View over the metadata half of block 0.
#[derive(Debug, Clone, Copy)]
pub struct MetadataRegion<'a> {
    bytes: &'a [u8],
}

impl<'a> MetadataRegion<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Offset of the most recent entry.
    ///
    /// Walks entries from the start while the magic matches and the declared
    /// record count fits the region.
    pub fn latest_offset(&self) -> Result<usize, NorError> {
        let mut latest = None;
        let mut offset = 0usize;
        while offset + HEADER_LEN <= self.bytes.len() {
            let Ok(header) = MetaHeader::decode(&self.bytes[offset..]) else {
                break;
            };
            let count = header.rom_count as usize;
            if count > MAX_RECORDS {
                break;
            }
            let len = HEADER_LEN + count * RECORD_LEN;
            if offset + len > self.bytes.len() {
                break;
            }
            latest = Some(offset);
            offset += len;
        }
        latest.ok_or(NorError::NoValidEntry)
    }

    pub fn latest(&self) -> Result<TocEntry, NorError> {
        let offset = self.latest_offset()?;
        debug!(offset, "found latest metadata entry");
        TocEntry::decode(self.bytes, offset)
    }
}
