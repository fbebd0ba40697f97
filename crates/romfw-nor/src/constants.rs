//! Flash layout constants shared by the packer and the metadata reader.

/// Magic at the start of every metadata TOC entry.
pub const MAGIC: u32 = 0x6A7E_60D1;

/// Byte used for every padding run, matching erased NOR.
pub const FILL_BYTE: u8 = 0xFF;

/// NOR erase/mapping unit.
pub const BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Physical flash size the firmware manages.
pub const FLASH_SIZE: usize = 128 * 1024 * 1024;

/// Number of blocks in the physical flash, including block 0.
pub const FLASH_BLOCK_COUNT: usize = FLASH_SIZE / BLOCK_SIZE;

/// Firmware occupies the first half of block 0.
pub const FIRMWARE_REGION_SIZE: usize = 2 * 1024 * 1024;

/// Metadata occupies the second half of block 0.
pub const METADATA_REGION_SIZE: usize = 2 * 1024 * 1024;

/// First block available to ROM data.
pub const FIRST_ROM_BLOCK: usize = 1;

/// Block map entries per ROM; caps a ROM at 32 MiB.
pub const MAX_ROM_BLOCKS: usize = 8;

/// Block-balancing counters reserved in each header.
pub const BALANCE_SLOTS: usize = 32;

/// magic + checksum + count + balancing counters.
pub const HEADER_LEN: usize = 12 + 4 * BALANCE_SLOTS;

/// Size of the NUL-padded file name field.
pub const NAME_LEN: usize = 256;

/// game code + (cart type, blocks, 2 reserved) + block map + name.
pub const RECORD_LEN: usize = 4 + 4 + MAX_ROM_BLOCKS + NAME_LEN;

/// Largest record count that fits one TOC entry in the metadata region.
pub const MAX_RECORDS: usize = (METADATA_REGION_SIZE - HEADER_LEN) / RECORD_LEN;

/// Cartridge header field offsets.
pub const GAME_CODE_OFFSET: usize = 0xAC;
pub const GAME_CODE_LEN: usize = 4;
pub const CART_TYPE_OFFSET: usize = 0xBC;
