//! Pixel color handling: alpha binarization, 8-step channel rounding and the
//! 15-bit packing used by the firmware palette.

/// Pixels with an alpha strictly above this value are opaque.
pub const ALPHA_THRESHOLD: u8 = 128;

/// An unpremultiplied RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a > ALPHA_THRESHOLD
    }

    /// The palette key of this pixel (alpha is not part of it).
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Binarize alpha and round the color channels.
    ///
    /// Opaque pixels keep their rounded color with alpha forced to 255; every
    /// other pixel collapses to [`Rgba::TRANSPARENT`].
    pub fn quantize(self) -> Self {
        if self.is_opaque() {
            Self::new(
                round_channel(self.r),
                round_channel(self.g),
                round_channel(self.b),
                u8::MAX,
            )
        } else {
            Self::TRANSPARENT
        }
    }
}

/// A palette color. Ordering is lexicographic on (r, g, b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `0bxBBBBBGGGGGRRRRR` (red in the low bits).
    #[inline]
    pub const fn to_bgr555(self) -> u16 {
        (self.r as u16 >> 3) | ((self.g as u16 >> 3) << 5) | ((self.b as u16 >> 3) << 10)
    }
}

/// Round to the nearest multiple of 8, half up. Values that would round to 256
/// saturate at 255.
#[inline]
pub fn round_channel(v: u8) -> u8 {
    let rounded = (v as u16 + 4) / 8 * 8;
    rounded.min(u8::MAX as u16) as u8
}
