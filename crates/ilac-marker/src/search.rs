use ilac_core::{MarkerCenterSource, PixelRect};
use log::info;
use nalgebra::Point2;

use crate::{ReferenceError, ReferenceQuad};

/// Ask `source` for marker centers inside `region` and order them around
/// `center`.
pub fn locate_reference(
    source: &dyn MarkerCenterSource,
    center: Point2<f32>,
    region: PixelRect,
) -> Result<ReferenceQuad, ReferenceError> {
    let markers = source.detect_marker_centers(region)?;
    info!(
        "{} marker centers in region {}x{}+{}+{}",
        markers.len(),
        region.width,
        region.height,
        region.x,
        region.y
    );
    ReferenceQuad::resolve(center, &markers)
}
