//! Color-coded board built from a detected corner grid.

use ilac_core::{BoardSize, BoundsError, DetectionError, HueImageView, PixelRect};
use log::{debug, info};
use nalgebra::Point2;

use crate::color::{classify_hue, ColorClass};
use crate::exemplar::{Classification, HueSample};
use crate::identifier::Identifier;
use crate::params::BoardParams;
use crate::quad::Quad;
use crate::scan::scan_mean_hue;
use crate::{BoardError, ClassifyError};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One non-black grid cell with its measured color.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    quad: Quad,
    hue: f32,
    class: ColorClass,
}

impl Cell {
    /// Scan `quad` in `image` and classify its mean hue.
    pub fn measure(quad: Quad, image: &HueImageView<'_>, index: usize) -> Result<Self, BoardError> {
        let geometry = |source| BoardError::Geometry {
            cell: index,
            source,
        };
        let view = image.sub_view(quad.rect()).map_err(geometry)?;
        let hue = scan_mean_hue(&quad, &view).map_err(geometry)?;
        let class = classify_hue(hue)?;
        Ok(Self { quad, hue, class })
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Crop rectangle in image coordinates.
    pub fn rect(&self) -> PixelRect {
        self.quad.rect()
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn class(&self) -> ColorClass {
        self.class
    }

    fn sample(&self) -> HueSample {
        HueSample {
            hue: self.hue,
            class: self.class,
        }
    }
}

/// Corners (UL, UR, LR, LL) of every non-black cell in row-major order.
///
/// Cell `(r, c)` is black when `r + c` is even, so the top-left cell is
/// black. `corners` must hold `size.corner_count()` row-major points.
pub fn non_black_cell_corners(
    size: BoardSize,
    corners: &[Point2<f32>],
) -> Result<Vec<[Point2<f32>; 4]>, DetectionError> {
    if corners.len() != size.corner_count() {
        return Err(DetectionError::CornerCountMismatch {
            expected: size.corner_count(),
            got: corners.len(),
        });
    }
    let w = size.width as usize;
    let h = size.height as usize;
    let mut out = Vec::with_capacity(size.cell_count().div_ceil(2));
    for r in 0..h.saturating_sub(1) {
        for c in 0..w.saturating_sub(1) {
            if (r + c) % 2 == 0 {
                continue;
            }
            let ul = r * w + c;
            out.push([corners[ul], corners[ul + 1], corners[ul + w + 1], corners[ul + w]]);
        }
    }
    Ok(out)
}

/// A fully measured and classified board.
#[derive(Clone, Debug)]
pub struct Board {
    size: BoardSize,
    corners: Vec<Point2<f32>>,
    cells: Vec<Cell>,
    sample_count: usize,
    marker_sample: Option<usize>,
    classification: Classification,
}

impl Board {
    /// Build cells from `corners`, measure their hues in `image` and classify
    /// the data cells against the sample cells.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(corners, image, params), fields(corners = corners.len()))
    )]
    pub fn new(
        size: BoardSize,
        corners: Vec<Point2<f32>>,
        image: &HueImageView<'_>,
        params: &BoardParams,
    ) -> Result<Self, BoardError> {
        let size = size.validated()?;
        let cell_corners = non_black_cell_corners(size, &corners)?;
        if let Some(index) = params.marker_sample.filter(|&i| i >= params.sample_cells) {
            return Err(BoardError::InvalidMarkerSample {
                index,
                samples: params.sample_cells,
            });
        }

        let quads = cell_corners
            .into_iter()
            .enumerate()
            .map(|(i, pts)| {
                Quad::from_corners(pts).map_err(|source| BoardError::Geometry { cell: i, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if quads.len() < params.sample_cells {
            return Err(BoardError::NotEnoughCells {
                cells: quads.len(),
                samples: params.sample_cells,
            });
        }

        let cells = measure_cells(quads, image)?;

        let samples: Vec<HueSample> = cells[..params.sample_cells]
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != params.marker_sample)
            .map(|(_, c)| c.sample())
            .collect();
        let data: Vec<HueSample> = cells[params.sample_cells..]
            .iter()
            .map(Cell::sample)
            .collect();
        let classification = params.classifier.classify(&samples, &data)?;

        info!(
            "board {}x{}: {} cells, {} samples, {} exemplar groups",
            size.width,
            size.height,
            cells.len(),
            params.sample_cells,
            classification.groups.len()
        );

        Ok(Self {
            size,
            corners,
            cells,
            sample_count: params.sample_cells,
            marker_sample: params.marker_sample,
            classification,
        })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Detected corners, row-major.
    pub fn corners(&self) -> &[Point2<f32>] {
        &self.corners
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn data_count(&self) -> usize {
        self.cells.len() - self.sample_count
    }

    pub fn cell(&self, index: usize) -> Result<&Cell, BoundsError> {
        BoundsError::check("cell", &self.cells, index)
    }

    pub fn sample_cell(&self, offset: usize) -> Result<&Cell, BoundsError> {
        BoundsError::check("sample cell", &self.cells[..self.sample_count], offset)
    }

    pub fn data_cell(&self, offset: usize) -> Result<&Cell, BoundsError> {
        BoundsError::check("data cell", &self.cells[self.sample_count..], offset)
    }

    /// The sample cell reserved for the reference sphere, if any.
    pub fn marker_cell(&self) -> Option<&Cell> {
        self.marker_sample.and_then(|i| self.cells.get(i))
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Class assigned to each data cell by the exemplar classifier.
    pub fn data_classes(&self) -> Vec<ColorClass> {
        self.classification.classes()
    }

    pub fn identifier(&self) -> Result<Identifier, ClassifyError> {
        Identifier::encode(&self.data_classes())
    }

    /// Bounding box of all corners, `(min, max)`.
    pub fn corner_bounds(&self) -> (Point2<f32>, Point2<f32>) {
        let mut min = Point2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in &self.corners {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Centroid of the corner grid, the board's reference point.
    pub fn center(&self) -> Point2<f32> {
        let n = self.corners.len().max(1) as f32;
        let sum = self
            .corners
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / n)
    }

    /// Corner bounding box scaled by `scale` about its center and clamped to
    /// a `width` x `height` image. Used to restrict the marker search.
    pub fn marker_search_rect(&self, scale: f32, width: usize, height: usize) -> PixelRect {
        let (min, max) = self.corner_bounds();
        let cx = 0.5 * (min.x + max.x);
        let cy = 0.5 * (min.y + max.y);
        let hw = 0.5 * (max.x - min.x) * scale;
        let hh = 0.5 * (max.y - min.y) * scale;
        let x0 = (cx - hw).floor().clamp(0.0, width as f32) as usize;
        let y0 = (cy - hh).floor().clamp(0.0, height as f32) as usize;
        let x1 = (cx + hw).ceil().clamp(0.0, width as f32) as usize;
        let y1 = (cy + hh).ceil().clamp(0.0, height as f32) as usize;
        PixelRect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

fn measure_cells(quads: Vec<Quad>, image: &HueImageView<'_>) -> Result<Vec<Cell>, BoardError> {
    #[cfg(feature = "rayon")]
    let cells = quads
        .into_par_iter()
        .enumerate()
        .map(|(i, q)| Cell::measure(q, image, i))
        .collect::<Result<Vec<_>, _>>();

    #[cfg(not(feature = "rayon"))]
    let cells = quads
        .into_iter()
        .enumerate()
        .map(|(i, q)| Cell::measure(q, image, i))
        .collect::<Result<Vec<_>, _>>();

    if let Ok(cells) = &cells {
        for (i, c) in cells.iter().enumerate() {
            debug!("cell {i}: rect {:?} hue {:.2} class {:03b}", c.rect(), c.hue, c.class.bits());
        }
    }
    cells
}
