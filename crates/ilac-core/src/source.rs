//! Seams to the detectors this workspace does not implement.

use nalgebra::Point2;

use crate::{BoardSize, DetectionError, PixelRect};

/// Chessboard corner detector.
///
/// Implementations return the `width * height` inner corners of a board in
/// row-major order (left to right, top to bottom), refined to subpixel
/// accuracy, or [`DetectionError::NoBoardFound`].
pub trait GridCornerSource {
    fn detect_grid_corners(&self, size: BoardSize) -> Result<Vec<Point2<f32>>, DetectionError>;
}

/// Marker (reference sphere) detector restricted to a search region.
pub trait MarkerCenterSource {
    fn detect_marker_centers(&self, region: PixelRect) -> Result<Vec<Point2<f32>>, DetectionError>;
}

/// Corners already known, e.g. loaded from disk or produced by a previous run.
#[derive(Clone, Debug, Default)]
pub struct FixedCorners(pub Vec<Point2<f32>>);

impl GridCornerSource for FixedCorners {
    fn detect_grid_corners(&self, _size: BoardSize) -> Result<Vec<Point2<f32>>, DetectionError> {
        if self.0.is_empty() {
            return Err(DetectionError::NoBoardFound);
        }
        Ok(self.0.clone())
    }
}

/// Marker centers already known; points outside the region are dropped.
#[derive(Clone, Debug, Default)]
pub struct FixedMarkers(pub Vec<Point2<f32>>);

impl MarkerCenterSource for FixedMarkers {
    fn detect_marker_centers(&self, region: PixelRect) -> Result<Vec<Point2<f32>>, DetectionError> {
        Ok(self
            .0
            .iter()
            .copied()
            .filter(|p| {
                p.x >= region.x as f32
                    && p.y >= region.y as f32
                    && p.x < region.right() as f32
                    && p.y < region.bottom() as f32
            })
            .collect())
    }
}
