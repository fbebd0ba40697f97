use crate::constants::{MAX_ROM_BLOCKS, NAME_LEN, RECORD_LEN};
use crate::error::NorError;

/// Per-ROM metadata record (wire format).
///
/// Offsets (bytes):
/// - 0..4     game code, copied from the cartridge header
/// - 4        cart type byte, copied from the cartridge header
/// - 5        number of blocks used
/// - 6..8     reserved (always 0)
/// - 8..16    block map, unused entries are 0
/// - 16..272  UTF-8 file name, NUL padded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRecord {
    pub game_code: [u8; 4],
    pub cart_type: u8,
    pub num_blocks: u8,
    pub block_map: [u8; MAX_ROM_BLOCKS],
    name: String,
}

impl MetaRecord {
    pub const LEN: usize = RECORD_LEN;

    pub fn new(
        game_code: [u8; 4],
        cart_type: u8,
        num_blocks: u8,
        block_map: [u8; MAX_ROM_BLOCKS],
        name: String,
    ) -> Result<Self, NorError> {
        if name.len() > NAME_LEN {
            return Err(NorError::NameTooLong(name));
        }
        Ok(Self {
            game_code,
            cart_type,
            num_blocks,
            block_map,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mapped block indices, in ROM order.
    pub fn blocks(&self) -> impl Iterator<Item = u8> + '_ {
        self.block_map.iter().copied().filter(|&b| b != 0)
    }

    pub fn encode_into(&self, out: &mut [u8; RECORD_LEN]) {
        out[0..4].copy_from_slice(&self.game_code);
        out[4] = self.cart_type;
        out[5] = self.num_blocks;
        out[6] = 0;
        out[7] = 0;
        out[8..16].copy_from_slice(&self.block_map);

        let name = self.name.as_bytes();
        out[16..16 + name.len()].copy_from_slice(name);
        out[16 + name.len()..].fill(0);
    }

    pub fn decode(buf: &[u8]) -> Result<Self, NorError> {
        let buf: &[u8; RECORD_LEN] = buf
            .get(..RECORD_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(NorError::TooShort {
                need: RECORD_LEN,
                got: buf.len(),
            })?;

        let mut game_code = [0u8; 4];
        game_code.copy_from_slice(&buf[0..4]);
        let mut block_map = [0u8; MAX_ROM_BLOCKS];
        block_map.copy_from_slice(&buf[8..16]);

        let raw_name = &buf[16..];
        let end = raw_name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        let name = String::from_utf8_lossy(&raw_name[..end]).into_owned();

        Ok(Self {
            game_code,
            cart_type: buf[4],
            num_blocks: buf[5],
            block_map,
            name,
        })
    }
}
