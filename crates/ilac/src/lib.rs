//! High-level facade crate for the `ilac-*` workspace.
//!
//! ILAC labels images of plants photographed together with a color-coded
//! chessboard. Given the board's grid corners (from any corner detector) and
//! a hue plane of the image, it classifies each non-black cell into one of
//! six colors and packs the data-cell colors into a compact identifier.
//! Optionally, the board center and three reference-sphere centers are
//! ordered into a convex quadrilateral for perspective correction.
//!
//! This crate provides:
//! - re-exports of the underlying crates
//! - [`BoardLabeler`], the end-to-end pipeline over pluggable detectors
//! - (feature `image`) adapters from `image` buffers to hue planes
//!
//! ## Quickstart
//!
//! ```
//! use ilac::core::{BoardSize, FixedCorners, HueImage, Point2};
//! use ilac::{BoardLabeler, LabelerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = HueImage::filled(200, 160, 60.0);
//! let corners: Vec<Point2<f32>> = (0..5)
//!     .flat_map(|r| (0..6).map(move |c| Point2::new(10.0 + 30.0 * c as f32, 10.0 + 30.0 * r as f32)))
//!     .collect();
//!
//! let labeler = BoardLabeler::new(LabelerParams::new(BoardSize::new(6, 5)));
//! let labeled = labeler.label(&image.as_view(), &FixedCorners(corners))?;
//! assert_eq!(labeled.board.data_count(), 4);
//! assert_eq!(labeled.identifier.to_string(), "00aa");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `ilac::core`: hue planes, board size, errors, detector traits, homography.
//! - `ilac::chessboard`: cell geometry, hue scan, color classes, identifier.
//! - `ilac::marker`: reference-point ordering.
//! - `ilac::detect` (feature `image`): hue planes from `image::RgbImage`.

pub use ilac_chessboard as chessboard;
pub use ilac_core as core;
pub use ilac_marker as marker;

mod labeler;

pub use ilac_chessboard::{Board, BoardParams, ColorClass, Identifier};
pub use ilac_core::{BoardSize, GridCornerSource, HueImageView, MarkerCenterSource};
pub use ilac_marker::ReferenceQuad;
pub use labeler::{BoardLabeler, LabelError, LabeledBoard, LabelerParams};

#[cfg(feature = "image")]
pub mod detect;
