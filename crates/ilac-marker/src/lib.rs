//! Reference points of an ILAC board: the board center plus three marker
//! (sphere) centers.
//!
//! Marker centers come from an external detector through
//! [`ilac_core::MarkerCenterSource`]. This crate only decides the order in
//! which the four points form a convex quadrilateral, so that a perspective
//! correction can map them onto a canonical square.
//!
//! ```
//! use ilac_marker::ReferenceQuad;
//! use nalgebra::Point2;
//!
//! let center = Point2::new(0.0, 0.0);
//! let markers = [Point2::new(10.0, 10.0), Point2::new(10.0, 0.0), Point2::new(0.0, 10.0)];
//! let quad = ReferenceQuad::resolve(center, &markers).unwrap();
//! assert_eq!(quad.ordering(), [0, 2, 1, 3]);
//! ```

mod error;
mod reference;
mod search;

pub use error::ReferenceError;
pub use reference::{interior_angles, ReferenceQuad, CANDIDATE_ORDERINGS, MARKER_COUNT};
pub use search::locate_reference;
