//! Sprite sheet loading.
//!
//! A sheet is a row of 16x16 icon cells. Each cell is stored by the firmware as
//! four 8x8 sub-tiles: top-left, top-right, bottom-left, bottom-right.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use crate::color::Rgba;
use crate::error::IconError;

/// Edge length of one icon cell.
pub const CELL_SIZE: u32 = 16;
/// Edge length of one firmware tile.
pub const TILE_SIZE: u32 = 8;
/// Sub-tiles per cell.
pub const TILES_PER_CELL: usize = 4;

/// An 8x8 grid of pixels.
pub type Tile = [[Rgba; TILE_SIZE as usize]; TILE_SIZE as usize];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl SpriteSheet {
    /// Wrap a row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, IconError> {
        if width % CELL_SIZE != 0 || height < CELL_SIZE {
            return Err(IconError::InvalidDimensions { width, height });
        }
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel buffer does not match sheet dimensions"
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode a PNG of any color type and bit depth into RGBA8.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, IconError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let (color_type, _) = reader.output_color_type();
        let info = reader.info();
        let (width, height) = (info.width, info.height);
        let mut buf = vec![0u8; width as usize * height as usize * color_type.samples()];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());

        debug!(width, height, ?color_type, "decoded sprite sheet");

        let pixels = match color_type {
            png::ColorType::Rgba => buf
                .chunks_exact(4)
                .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
                .collect(),
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .map(|p| Rgba::new(p[0], p[1], p[2], u8::MAX))
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
                .collect(),
            png::ColorType::Grayscale => buf
                .iter()
                .map(|&v| Rgba::new(v, v, v, u8::MAX))
                .collect(),
            other => return Err(IconError::UnsupportedColor(other)),
        };

        Self::from_pixels(width, height, pixels)
    }

    pub fn from_png_file(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let bytes = fs::read(path)?;
        Self::from_png_bytes(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 16x16 cells laid out left to right.
    pub fn cell_count(&self) -> usize {
        (self.width / CELL_SIZE) as usize
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Apply alpha binarization and channel rounding to every pixel.
    pub fn quantize(&mut self) {
        for px in &mut self.pixels {
            *px = px.quantize();
        }
    }

    /// Sub-tile `index` (0..4) of `cell`, in (col, row) order (0,0), (1,0), (0,1), (1,1).
    pub fn tile(&self, cell: usize, index: usize) -> Tile {
        let sx = (index & 1) as u32;
        let sy = (index >> 1) as u32;
        let x0 = cell as u32 * CELL_SIZE + sx * TILE_SIZE;
        let y0 = sy * TILE_SIZE;

        let mut tile = [[Rgba::TRANSPARENT; TILE_SIZE as usize]; TILE_SIZE as usize];
        for (row, line) in tile.iter_mut().enumerate() {
            for (col, px) in line.iter_mut().enumerate() {
                *px = self.pixel(x0 + col as u32, y0 + row as u32);
            }
        }
        tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_sheet(cells: u32) -> SpriteSheet {
        let width = cells * CELL_SIZE;
        let pixels = (0..CELL_SIZE)
            .flat_map(|y| (0..width).map(move |x| Rgba::new(x as u8, y as u8, 0, 255)))
            .collect();
        SpriteSheet::from_pixels(width, CELL_SIZE, pixels).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions() {
        let err = SpriteSheet::from_pixels(20, 16, vec![Rgba::TRANSPARENT; 20 * 16]).unwrap_err();
        assert!(matches!(
            err,
            IconError::InvalidDimensions {
                width: 20,
                height: 16
            }
        ));

        let err = SpriteSheet::from_pixels(16, 8, vec![Rgba::TRANSPARENT; 16 * 8]).unwrap_err();
        assert!(matches!(err, IconError::InvalidDimensions { .. }));
    }

    #[test]
    fn tiles_follow_column_then_row_order() {
        let sheet = numbered_sheet(2);
        assert_eq!(sheet.cell_count(), 2);

        // Top-left corner of each sub-tile in cell 1.
        let origins = [(16, 0), (24, 0), (16, 8), (24, 8)];
        for (index, (x, y)) in origins.into_iter().enumerate() {
            let tile = sheet.tile(1, index);
            assert_eq!(tile[0][0], Rgba::new(x, y, 0, 255), "tile {index}");
            assert_eq!(tile[7][7], Rgba::new(x + 7, y + 7, 0, 255), "tile {index}");
        }
    }

    #[test]
    fn decodes_rgb_png_as_opaque() {
        let mut png_bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_bytes, 16, 16);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0x40; 16 * 16 * 3]).unwrap();
        }

        let sheet = SpriteSheet::from_png_bytes(&png_bytes).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (16, 16));
        assert!(sheet.pixels().iter().all(|&p| p == Rgba::new(0x40, 0x40, 0x40, 255)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = SpriteSheet::from_png_bytes(b"definitely not a png").unwrap_err();
        assert!(matches!(err, IconError::Decode(_)));
    }
}
