use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("firmware image is {0} bytes, limit is 2 MiB")]
    FirmwareTooLarge(usize),
    #[error("ROM {0:?} is empty")]
    EmptyRom(String),
    #[error("ROM {name:?} needs {blocks} blocks, limit is 8 (32 MiB)")]
    RomTooLarge { name: String, blocks: usize },
    #[error("ROM name {0:?} is longer than 256 bytes")]
    NameTooLong(String),
    #[error("path {0} has no file name")]
    NoFileName(PathBuf),
    #[error("block index {0} does not fit in a block map entry")]
    BlockIndexOverflow(usize),
    #[error("{0} ROM records do not fit in the metadata region")]
    MetadataOverflow(usize),
    #[error("buffer too short: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },
    #[error("bad magic {0:#010x}")]
    BadMagic(u32),
    #[error("no valid metadata entry found")]
    NoValidEntry,
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("block {0} is mapped more than once")]
    BlockReused(u8),
    #[error("block {block} lies outside the {blocks}-block image")]
    BlockOutOfRange { block: u8, blocks: usize },
}
