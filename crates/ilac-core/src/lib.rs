//! Core types for ILAC (image labeling and classifying) board processing.
//!
//! This crate is intentionally small. It holds the pixel plane the cell
//! scanners read, the board dimensions, the shared error kinds and the traits
//! through which corner and marker detectors are plugged in. It does *not*
//! depend on any concrete detector or image decoder.

mod board_size;
mod error;
mod homography;
mod image;
mod logger;
mod source;

pub use board_size::BoardSize;
pub use error::{BoundsError, DetectionError, GeometryError};
pub use homography::{homography_from_4pt, Homography};
pub use image::{HueImage, HueImageView, PixelRect};
pub use source::{FixedCorners, FixedMarkers, GridCornerSource, MarkerCenterSource};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

pub use nalgebra::Point2;
