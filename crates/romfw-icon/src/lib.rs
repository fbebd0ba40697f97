//! Icon sheet to C converter.
//!
//! Reads a row of 16x16 icons and emits the enum, tile bitmap and BGR555
//! palette the firmware menu draws from.

pub mod catalog;
pub mod color;
pub mod emit;
pub mod error;
pub mod palette;
pub mod sheet;

use std::path::Path;

use tracing::info;

use crate::catalog::{FULL_CATALOG, IconSlot, SHORT_CATALOG};
use crate::emit::IconSource;
use crate::error::IconError;
use crate::palette::Palette;
use crate::sheet::SpriteSheet;

/// How pixel colors are turned into palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertMode {
    /// Round colors to 5 bits per channel and binarize alpha.
    #[default]
    Rounded,
    /// Use colors as stored; the sheet is expected to be pre-quantized.
    Raw,
}

impl ConvertMode {
    pub fn catalog(self) -> &'static [IconSlot] {
        match self {
            Self::Rounded => FULL_CATALOG,
            Self::Raw => SHORT_CATALOG,
        }
    }
}

/// Convert a decoded sheet into C source text.
pub fn convert(mut sheet: SpriteSheet, mode: ConvertMode) -> Result<String, IconError> {
    if mode == ConvertMode::Rounded {
        sheet.quantize();
    }
    let palette = Palette::collect(sheet.pixels())?;
    info!(
        cells = sheet.cell_count(),
        colors = palette.len(),
        ?mode,
        "converting icon sheet"
    );

    IconSource::new(&sheet, &palette, mode.catalog())?.render()
}

/// Load a PNG sheet from disk and convert it.
pub fn convert_file(path: impl AsRef<Path>, mode: ConvertMode) -> Result<String, IconError> {
    let sheet = SpriteSheet::from_png_file(path)?;
    convert(sheet, mode)
}
