use crate::math::Color;
use crate::ConfigurationError;
use alloc::{vec, vec::Vec};

/// An 8-bit RGBA color, as stored in the palette of a voxel container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// The red component.
    pub r: u8,
    /// The green component.
    pub g: u8,
    /// The blue component.
    pub b: u8,
    /// The alpha component. Kept for round-tripping, ignored by flat shading.
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the color of palette entries the decoder did not provide.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    /// Creates a new color from its components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The red, green and blue components mapped to `[0, 1]`.
    #[inline]
    pub fn to_rgb(self) -> Color {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// The 256-entry color table indexed by voxel material indices.
///
/// Entry `0` belongs to the empty material and is never used for shading. Entries beyond
/// the colors supplied at construction are opaque black.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "RawPalette"))]
pub struct Palette {
    colors: Vec<Rgba>,
    num_defined: usize,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawPalette {
    colors: Vec<Rgba>,
    num_defined: usize,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawPalette> for Palette {
    type Error = ConfigurationError;

    fn try_from(raw: RawPalette) -> Result<Self, Self::Error> {
        let mut palette = Palette::new(&raw.colors)?;
        palette.num_defined = raw.num_defined.min(palette.num_defined);
        Ok(palette)
    }
}

impl Palette {
    /// The maximum number of entries of a palette.
    pub const MAX_COLORS: usize = 256;

    /// Builds a palette from at most 256 colors.
    pub fn new(colors: &[Rgba]) -> Result<Self, ConfigurationError> {
        if colors.len() > Self::MAX_COLORS {
            return Err(ConfigurationError::PaletteTooLarge(colors.len()));
        }

        let mut all = Vec::with_capacity(Self::MAX_COLORS);
        all.extend_from_slice(colors);
        all.resize(Self::MAX_COLORS, Rgba::BLACK);

        Ok(Self {
            colors: all,
            num_defined: colors.len(),
        })
    }

    /// Builds a palette from raw `(r, g, b, a)` byte quadruples.
    pub fn from_rgba_bytes(colors: &[[u8; 4]]) -> Result<Self, ConfigurationError> {
        if colors.len() > Self::MAX_COLORS {
            return Err(ConfigurationError::PaletteTooLarge(colors.len()));
        }

        let colors: Vec<Rgba> = colors.iter().map(|c| Rgba::from(*c)).collect();
        Self::new(&colors)
    }

    /// The number of colors supplied at construction.
    pub fn num_defined(&self) -> usize {
        self.num_defined
    }

    /// Was the entry `index` supplied at construction?
    pub fn is_defined(&self, index: u8) -> bool {
        (index as usize) < self.num_defined
    }

    /// The color of the entry `index`.
    #[inline]
    pub fn color(&self, index: u8) -> Rgba {
        self.colors[index as usize]
    }

    /// The flat-shading color of the entry `index`.
    #[inline]
    pub fn rgb(&self, index: u8) -> Color {
        self.color(index).to_rgb()
    }
}

impl Default for Palette {
    /// A palette where every entry is opaque white.
    fn default() -> Self {
        Self {
            colors: vec![Rgba::new(255, 255, 255, 255); Self::MAX_COLORS],
            num_defined: Self::MAX_COLORS,
        }
    }
}
