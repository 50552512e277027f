use ilac_core::{GeometryError, HueImageView};

use crate::quad::Quad;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Streaming arithmetic mean: `mean' = (x + i*mean) / (i + 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningMean {
    count: u64,
    mean: f64,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, sample: f64) {
        let i = self.count as f64;
        self.mean = (sample + i * self.mean) / (i + 1.0);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until at least one sample has been pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

impl Extend<f64> for RunningMean {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

/// Mean hue of the pixels enclosed by `quad`.
///
/// `cell` is the hue plane cropped to `quad.rect()`. Every row `0..=height`
/// contributes the samples in `[left, right)` between its two bounding
/// edges; the running mean spans the whole scan.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(quad, cell), fields(rect = ?quad.rect()))
)]
pub fn scan_mean_hue(quad: &Quad, cell: &HueImageView<'_>) -> Result<f32, GeometryError> {
    let mut mean = RunningMean::new();
    let mut walker = quad.rows();
    let width = cell.width() as i32;

    for row in 0..=quad.height() {
        let (left, right) = walker.column_bounds(row)?;
        let Some(samples) = cell.row(row as usize) else {
            continue;
        };
        let left = left.clamp(0, width) as usize;
        let right = right.clamp(0, width) as usize;
        mean.extend(samples[left..right.max(left)].iter().map(|&h| h as f64));
    }

    mean.mean()
        .map(|m| m as f32)
        .ok_or(GeometryError::EmptyCell)
}
