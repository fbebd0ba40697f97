use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported PNG color layout {0:?} after expansion")]
    UnsupportedColor(png::ColorType),
    #[error("sheet is {width}x{height}, expected a width multiple of 16 and a height of at least 16")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("sheet holds {cells} icon cells but the catalog only names {slots}")]
    CatalogMismatch { cells: usize, slots: usize },
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("{0} distinct colors do not fit in an 8-bit palette index")]
    PaletteOverflow(usize),
}
