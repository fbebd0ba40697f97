use crate::constants::{BALANCE_SLOTS, HEADER_LEN, MAGIC};
use crate::error::NorError;

/// Metadata TOC header (wire format).
///
/// Offsets (bytes):
/// - 0..4    magic (u32 LE)
/// - 4..8    checksum (u32 LE)
/// - 8..12   record count (u32 LE)
/// - 12..140 per-block write counters for wear balancing (32 x u32 LE)
///
/// The records follow the header directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaHeader {
    pub checksum: u32,
    pub rom_count: u32,
    pub balance: [u32; BALANCE_SLOTS],
}

impl MetaHeader {
    pub const LEN: usize = HEADER_LEN;

    /// Header for a freshly generated record stream, with zeroed counters.
    pub fn for_records(records: &[u8], rom_count: u32) -> Self {
        Self {
            checksum: checksum(records, rom_count),
            rom_count,
            balance: [0; BALANCE_SLOTS],
        }
    }

    pub fn encode_into(&self, out: &mut [u8; HEADER_LEN]) {
        out[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        out[4..8].copy_from_slice(&self.checksum.to_le_bytes());
        out[8..12].copy_from_slice(&self.rom_count.to_le_bytes());
        for (slot, counter) in out[12..].chunks_exact_mut(4).zip(self.balance) {
            slot.copy_from_slice(&counter.to_le_bytes());
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self, NorError> {
        if buf.len() < HEADER_LEN {
            return Err(NorError::TooShort {
                need: HEADER_LEN,
                got: buf.len(),
            });
        }
        let magic = read_u32_le(buf, 0);
        if magic != MAGIC {
            return Err(NorError::BadMagic(magic));
        }

        let mut balance = [0u32; BALANCE_SLOTS];
        for (i, counter) in balance.iter_mut().enumerate() {
            *counter = read_u32_le(buf, 12 + i * 4);
        }

        Ok(Self {
            checksum: read_u32_le(buf, 4),
            rom_count: read_u32_le(buf, 8),
            balance,
        })
    }
}

/// XOR of every little-endian u32 word in `data`. Trailing bytes that do not
/// form a full word are ignored; record streams are always word sized.
pub fn xor_fold(data: &[u8]) -> u32 {
    data.chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .fold(0, |acc, w| acc ^ w)
}

/// Checksum stored in the header: the record words folded with XOR, then
/// XORed with the record count.
pub fn checksum(records: &[u8], rom_count: u32) -> u32 {
    xor_fold(records) ^ rom_count
}

/// Callers check the length first.
fn read_u32_le(buf: &[u8], start: usize) -> u32 {
    u32::from_le_bytes([buf[start], buf[start + 1], buf[start + 2], buf[start + 3]])
}
