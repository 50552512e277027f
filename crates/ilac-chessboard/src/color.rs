//! Hue sextants and the 3-bit color classes they map to.

use serde::{Deserialize, Serialize};

use crate::ClassifyError;

/// Red/green/blue indicator triple of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorClass {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl ColorClass {
    pub const NONE: Self = Self::from_bits(0b000);
    pub const RED: Self = Self::from_bits(0b100);
    pub const YELLOW: Self = Self::from_bits(0b110);
    pub const GREEN: Self = Self::from_bits(0b010);
    pub const CYAN: Self = Self::from_bits(0b011);
    pub const BLUE: Self = Self::from_bits(0b001);
    pub const MAGENTA: Self = Self::from_bits(0b101);

    /// Classes in hue order, starting at the red sextant.
    pub const SEXTANTS: [Self; 6] = [
        Self::RED,
        Self::YELLOW,
        Self::GREEN,
        Self::CYAN,
        Self::BLUE,
        Self::MAGENTA,
    ];

    /// Build from `0b rgb`.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            red: bits & 0b100 != 0,
            green: bits & 0b010 != 0,
            blue: bits & 0b001 != 0,
        }
    }

    pub const fn bits(self) -> u8 {
        (self.red as u8) << 2 | (self.green as u8) << 1 | self.blue as u8
    }

    /// Class for a sextant index; unknown indices give [`ColorClass::NONE`].
    pub fn from_index(index: usize) -> Self {
        Self::SEXTANTS.get(index).copied().unwrap_or(Self::NONE)
    }

    /// Sextant index, or `None` for the no-color triple and the impossible
    /// all-ones triple.
    pub fn index(self) -> Option<usize> {
        Self::SEXTANTS.iter().position(|&c| c == self)
    }
}

/// One entry of the hue lookup table: `(lower, upper]` in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueBand {
    pub lower: f32,
    pub upper: f32,
    pub class: ColorClass,
}

/// Six 60°-wide arcs offset by 31.66°. Red wraps through 0°.
pub static HUE_BANDS: [HueBand; 6] = [
    HueBand {
        lower: 31.66,
        upper: 95.0,
        class: ColorClass::YELLOW,
    },
    HueBand {
        lower: 95.0,
        upper: 158.33,
        class: ColorClass::GREEN,
    },
    HueBand {
        lower: 158.33,
        upper: 221.66,
        class: ColorClass::CYAN,
    },
    HueBand {
        lower: 221.66,
        upper: 285.0,
        class: ColorClass::BLUE,
    },
    HueBand {
        lower: 285.0,
        upper: 348.33,
        class: ColorClass::MAGENTA,
    },
    HueBand {
        lower: 348.33,
        upper: 360.0 + 31.66,
        class: ColorClass::RED,
    },
];

/// Map a hue angle in `[0, 360)` to its sextant class.
pub fn classify_hue(hue: f32) -> Result<ColorClass, ClassifyError> {
    classify_hue_with(&HUE_BANDS, hue)
}

/// Same as [`classify_hue`] against a caller-provided table.
///
/// Bands are half-open `(lower, upper]`; a hue at or below the first band's
/// lower bound is unwrapped by 360° before lookup.
pub fn classify_hue_with(bands: &[HueBand], hue: f32) -> Result<ColorClass, ClassifyError> {
    if !(0.0..360.0).contains(&hue) {
        return Err(ClassifyError::HueOutOfRange { hue });
    }
    let floor = bands.first().map(|b| b.lower).unwrap_or(0.0);
    let h = if hue <= floor { hue + 360.0 } else { hue };
    bands
        .iter()
        .find(|b| h > b.lower && h <= b.upper)
        .map(|b| b.class)
        .ok_or(ClassifyError::HueOutOfRange { hue })
}

/// Angular distance on the hue circle, in `[0, 180]`.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
