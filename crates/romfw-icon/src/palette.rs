use std::collections::BTreeSet;

use tracing::warn;

use crate::color::{Rgb, Rgba};
use crate::error::IconError;

/// Palette index reserved for transparent pixels.
pub const TRANSPARENT_INDEX: u8 = 0;

/// Largest palette the 4-bit tile format can address without clipping.
pub const TILE_PALETTE_COLORS: usize = 15;

/// Distinct opaque colors, sorted ascending by (r, g, b).
///
/// Entry `i` is addressed as palette index `i + 1`; index 0 is transparency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Collect every opaque color in `pixels`.
    pub fn collect<'a>(pixels: impl IntoIterator<Item = &'a Rgba>) -> Result<Self, IconError> {
        let set: BTreeSet<Rgb> = pixels
            .into_iter()
            .filter(|px| px.is_opaque())
            .map(|px| px.rgb())
            .collect();

        if set.len() > u8::MAX as usize {
            return Err(IconError::PaletteOverflow(set.len()));
        }
        if set.len() > TILE_PALETTE_COLORS {
            warn!(
                colors = set.len(),
                "palette exceeds {TILE_PALETTE_COLORS} colors and will not fit 4-bit tiles"
            );
        }

        Ok(Self {
            colors: set.into_iter().collect(),
        })
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette index for a pixel: 0 when transparent, otherwise `1 + position`.
    ///
    /// Panics if an opaque pixel's color was not part of the collected set.
    pub fn index_of(&self, px: Rgba) -> u8 {
        if !px.is_opaque() {
            return TRANSPARENT_INDEX;
        }
        let pos = self
            .colors
            .binary_search(&px.rgb())
            .unwrap_or_else(|_| panic!("color {:?} missing from palette", px.rgb()));
        (pos + 1) as u8
    }

    /// Packed BGR555 values, without the transparent sentinel.
    pub fn packed(&self) -> impl Iterator<Item = u16> + '_ {
        self.colors.iter().map(|c| c.to_bgr555())
    }
}
