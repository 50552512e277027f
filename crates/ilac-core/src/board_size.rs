use serde::{Deserialize, Serialize};

use crate::DetectionError;

/// Board dimensions in inner corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: u32,
    pub height: u32,
}

impl BoardSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Normalize to `width >= height` and reject boards without a unique origin.
    ///
    /// Width and height must have different parity: a 6x5 board has a single
    /// symmetry axis, a 6x4 or 5x5 board does not.
    pub fn validated(self) -> Result<Self, DetectionError> {
        let (width, height) = if self.height > self.width {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        if height < 2 {
            return Err(DetectionError::BoardTooSmall { width, height });
        }
        if width % 2 == height % 2 {
            return Err(DetectionError::SymmetricBoard { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of inner corners.
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of grid cells (black and non-black).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width.saturating_sub(1) as usize * self.height.saturating_sub(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_portrait_boards() {
        let size = BoardSize::new(5, 6).validated().expect("asymmetric");
        assert_eq!(size, BoardSize::new(6, 5));
        assert_eq!(size.corner_count(), 30);
        assert_eq!(size.cell_count(), 20);
    }

    #[test]
    fn rejects_equal_parity() {
        assert_eq!(
            BoardSize::new(6, 4).validated(),
            Err(DetectionError::SymmetricBoard {
                width: 6,
                height: 4
            })
        );
        assert!(BoardSize::new(5, 5).validated().is_err());
    }

    #[test]
    fn rejects_single_row() {
        assert!(matches!(
            BoardSize::new(4, 1).validated(),
            Err(DetectionError::BoardTooSmall { .. })
        ));
    }
}
