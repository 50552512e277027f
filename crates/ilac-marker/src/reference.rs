//! Convex ordering of the board center and the three marker centers.

use ilac_core::{homography_from_4pt, DetectionError, Homography};
use log::{debug, warn};
use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

use crate::ReferenceError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Markers consumed by the orderer; extra detections are ignored.
pub const MARKER_COUNT: usize = 3;

/// Cyclic orderings tried in turn. Index 0 is the board center.
pub const CANDIDATE_ORDERINGS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 1, 3, 2]];

const ANGLE_SUM_REL_TOL: f64 = 1e-3;

/// Board center plus three marker centers in a convex cyclic order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceQuad {
    points: [Point2<f32>; 4],
    ordering: [usize; 4],
}

impl ReferenceQuad {
    /// Find the first candidate ordering of `center` and the first three
    /// `markers` that forms a convex, non-self-intersecting quadrilateral.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(markers), fields(markers = markers.len())))]
    pub fn resolve(center: Point2<f32>, markers: &[Point2<f32>]) -> Result<Self, ReferenceError> {
        if markers.len() < MARKER_COUNT {
            return Err(DetectionError::InsufficientMarkers {
                found: markers.len(),
            }
            .into());
        }
        if markers.len() > MARKER_COUNT {
            warn!(
                "{} marker centers detected, keeping the first {MARKER_COUNT}",
                markers.len()
            );
        }
        let input = [center, markers[0], markers[1], markers[2]];

        for ordering in CANDIDATE_ORDERINGS {
            let points = ordering.map(|i| input[i]);
            match interior_angles(&points) {
                Some(angles) if is_convex(&angles) => {
                    debug!("reference ordering {ordering:?}, angles {angles:?}");
                    return Ok(Self { points, ordering });
                }
                angles => debug!("rejected ordering {ordering:?}, angles {angles:?}"),
            }
        }
        Err(ReferenceError::NoConvexOrdering)
    }

    /// Points in cyclic order, starting at the board center.
    pub fn points(&self) -> &[Point2<f32>; 4] {
        &self.points
    }

    /// Input indices (0 = center, 1..=3 = markers) of [`Self::points`].
    pub fn ordering(&self) -> [usize; 4] {
        self.ordering
    }

    /// Interior angles in degrees, one per point. `None` when consecutive
    /// points coincide, which only a deserialized quad can hold.
    pub fn angles(&self) -> Option<[f64; 4]> {
        interior_angles(&self.points)
    }

    /// Projective map from the ordered points onto `dst`.
    ///
    /// `dst` must list its corners in the same cyclic order as [`Self::points`].
    pub fn homography_to(&self, dst: &[Point2<f32>; 4]) -> Option<Homography> {
        homography_from_4pt(&self.points, dst)
    }
}

/// Unsigned interior angle at every vertex from its side lengths (law of
/// cosines). `None` when two consecutive vertices coincide.
pub fn interior_angles(points: &[Point2<f32>; 4]) -> Option<[f64; 4]> {
    let p = points.map(|p| Point2::new(p.x as f64, p.y as f64));
    let mut out = [0.0; 4];
    for (i, angle) in out.iter_mut().enumerate() {
        let prev = p[(i + 3) % 4];
        let next = p[(i + 1) % 4];
        let a = distance(&prev, &p[i]);
        let b = distance(&p[i], &next);
        let c = distance(&prev, &next);
        if a <= f64::EPSILON || b <= f64::EPSILON {
            return None;
        }
        let cos = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
        *angle = cos.acos().to_degrees();
    }
    Some(out)
}

/// Unsigned angles reach 360° only for a simple convex polygon; bow-ties and
/// concave orderings fall short.
fn is_convex(angles: &[f64; 4]) -> bool {
    let sum: f64 = angles.iter().sum();
    angles.iter().all(|&a| a < 180.0) && (sum - 360.0).abs() <= 360.0 * ANGLE_SUM_REL_TOL
}
