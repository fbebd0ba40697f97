//! ROM preparation: 4 MiB alignment, header field extraction and block maps.

use std::fs;
use std::path::Path;

use crate::constants::{
    BLOCK_SIZE, CART_TYPE_OFFSET, FILL_BYTE, GAME_CODE_LEN, GAME_CODE_OFFSET, MAX_ROM_BLOCKS,
};
use crate::error::NorError;
use crate::record::MetaRecord;

/// A ROM padded with `0xFF` to a whole number of flash blocks.
#[derive(Debug, Clone)]
pub struct RomImage {
    name: String,
    data: Vec<u8>,
}

impl RomImage {
    /// Pad `data` to the next block boundary. The name is stored in the
    /// metadata record and limited to 256 bytes.
    pub fn new(name: impl Into<String>, mut data: Vec<u8>) -> Result<Self, NorError> {
        let name = name.into();
        if data.is_empty() {
            return Err(NorError::EmptyRom(name));
        }

        let blocks = data.len().div_ceil(BLOCK_SIZE);
        if blocks > MAX_ROM_BLOCKS {
            return Err(NorError::RomTooLarge { name, blocks });
        }
        data.resize(blocks * BLOCK_SIZE, FILL_BYTE);

        Ok(Self { name, data })
    }

    /// Read a ROM from disk, named after the file's base name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NorError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .ok_or_else(|| NorError::NoFileName(path.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        let data = fs::read(path)?;
        Self::new(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Padded contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn num_blocks(&self) -> usize {
        self.data.len() / BLOCK_SIZE
    }

    /// Four-character game code from the cartridge header.
    pub fn game_code(&self) -> [u8; GAME_CODE_LEN] {
        let mut code = [0u8; GAME_CODE_LEN];
        code.copy_from_slice(&self.data[GAME_CODE_OFFSET..GAME_CODE_OFFSET + GAME_CODE_LEN]);
        code
    }

    pub fn cart_type(&self) -> u8 {
        self.data[CART_TYPE_OFFSET]
    }

    /// Build the metadata record for this ROM placed at `base_block`.
    pub fn record(&self, base_block: usize) -> Result<MetaRecord, NorError> {
        let block_map = block_map(base_block, self.num_blocks())?;
        MetaRecord::new(
            self.game_code(),
            self.cart_type(),
            self.num_blocks() as u8,
            block_map,
            self.name.clone(),
        )
    }
}

/// Consecutive blocks starting at `base_block`, zero filled past `count`.
pub fn block_map(base_block: usize, count: usize) -> Result<[u8; MAX_ROM_BLOCKS], NorError> {
    debug_assert!(count <= MAX_ROM_BLOCKS);
    let mut map = [0u8; MAX_ROM_BLOCKS];
    for (i, entry) in map.iter_mut().take(count).enumerate() {
        let block = base_block + i;
        *entry = u8::try_from(block).map_err(|_| NorError::BlockIndexOverflow(block))?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gba_rom(len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[GAME_CODE_OFFSET..GAME_CODE_OFFSET + 4].copy_from_slice(b"BPEE");
        data[CART_TYPE_OFFSET] = 0x96;
        data
    }

    #[test]
    fn pads_to_block_boundary_with_fill() {
        let rom = RomImage::new("a.gba", gba_rom(BLOCK_SIZE + 1)).unwrap();
        assert_eq!(rom.num_blocks(), 2);
        assert_eq!(rom.data().len(), 2 * BLOCK_SIZE);
        assert!(rom.data()[BLOCK_SIZE + 1..].iter().all(|&b| b == FILL_BYTE));

        let exact = RomImage::new("b.gba", gba_rom(BLOCK_SIZE)).unwrap();
        assert_eq!(exact.num_blocks(), 1);
        assert_eq!(exact.data().len(), BLOCK_SIZE);
    }

    #[test]
    fn extracts_header_fields() {
        let rom = RomImage::new("emerald.gba", gba_rom(0x200)).unwrap();
        assert_eq!(&rom.game_code(), b"BPEE");
        assert_eq!(rom.cart_type(), 0x96);
    }

    #[test]
    fn tiny_rom_reads_fill_bytes() {
        let rom = RomImage::new("tiny.bin", vec![0u8; 0x10]).unwrap();
        assert_eq!(rom.game_code(), [FILL_BYTE; 4]);
        assert_eq!(rom.cart_type(), FILL_BYTE);
    }

    #[test]
    fn block_maps() {
        assert_eq!(block_map(1, 1).unwrap(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(block_map(2, 2).unwrap(), [2, 3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(block_map(3, 8).unwrap(), [3, 4, 5, 6, 7, 8, 9, 10]);
        assert!(matches!(
            block_map(250, 8),
            Err(NorError::BlockIndexOverflow(256))
        ));
    }

    #[test]
    fn rejects_empty_and_oversized_roms() {
        assert!(matches!(
            RomImage::new("empty.gba", Vec::new()),
            Err(NorError::EmptyRom(_))
        ));
        assert!(matches!(
            RomImage::new("huge.gba", vec![0u8; MAX_ROM_BLOCKS * BLOCK_SIZE + 1]),
            Err(NorError::RomTooLarge { blocks: 9, .. })
        ));
    }
}
