use serde::{Deserialize, Serialize};

use crate::{BoundsError, GeometryError};

/// Axis-aligned pixel rectangle in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the last column.
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// One past the last row.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }
}

/// Borrowed single-channel hue plane, row-major with an explicit stride.
///
/// Samples are hue angles in degrees, expected in `[0, 360)`.
#[derive(Clone, Copy, Debug)]
pub struct HueImageView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [f32],
}

/// Owned hue plane.
#[derive(Clone, Debug, PartialEq)]
pub struct HueImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>, // row-major, len = w*h
}

impl HueImage {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, BoundsError> {
        let expected = width.checked_mul(height).ok_or(BoundsError {
            what: "hue plane",
            index: usize::MAX,
            len: data.len(),
        })?;
        if data.len() != expected {
            return Err(BoundsError {
                what: "hue plane",
                index: expected,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Plane filled with a single hue.
    pub fn filled(width: usize, height: usize, hue: f32) -> Self {
        Self {
            width,
            height,
            data: vec![hue; width * height],
        }
    }

    pub fn as_view(&self) -> HueImageView<'_> {
        HueImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Paint every pixel of `rect` (clipped to the plane) with `hue`.
    pub fn fill_rect(&mut self, rect: PixelRect, hue: f32) {
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        for y in rect.y.min(y1)..y1 {
            let row = y * self.width;
            self.data[row + rect.x.min(x1)..row + x1].fill(hue);
        }
    }
}

impl<'a> HueImageView<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [f32],
    ) -> Result<Self, BoundsError> {
        let min_len = if height == 0 {
            0
        } else {
            stride
                .checked_mul(height - 1)
                .and_then(|v| v.checked_add(width))
                .unwrap_or(usize::MAX)
        };
        if stride < width || data.len() < min_len {
            return Err(BoundsError {
                what: "hue plane",
                index: min_len,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }

    /// Samples of row `y`, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&'a [f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Borrow the pixels covered by `rect`. The rectangle must lie inside the view.
    pub fn sub_view(&self, rect: PixelRect) -> Result<HueImageView<'a>, GeometryError> {
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(GeometryError::OutsideImage {
                rect,
                width: self.width,
                height: self.height,
            });
        }
        let start = rect.y * self.stride + rect.x;
        let data = self.data.get(start..).unwrap_or(&[]);
        Ok(HueImageView {
            width: rect.width,
            height: rect.height,
            stride: self.stride,
            data,
        })
    }
}
