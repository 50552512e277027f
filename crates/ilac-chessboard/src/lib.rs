//! Color-coded chessboard cells built on top of `ilac-core`.
//!
//! ## Quickstart
//!
//! ```
//! use ilac_chessboard::{classify_hue, ColorClass, Identifier};
//!
//! let classes = [
//!     classify_hue(10.0).unwrap(),
//!     classify_hue(60.0).unwrap(),
//!     classify_hue(320.0).unwrap(),
//! ];
//! assert_eq!(classes, [ColorClass::RED, ColorClass::YELLOW, ColorClass::MAGENTA]);
//! let id = Identifier::encode(&classes).unwrap();
//! assert_eq!(id.to_string(), "0009");
//! ```
//!
//! Pipeline:
//! 1. Validate the board size (width and height parities must differ).
//! 2. Walk the row-major corner grid and keep every non-black cell; the
//!    top-left cell is black.
//! 3. For each cell, crop the hue plane to the cell's bounding box and scan
//!    the enclosed pixels row by row, between the two edges straddling each
//!    row, into a single streaming mean.
//! 4. Map each mean hue to one of six sextant colors.
//! 5. Group the leading sample cells by color (skipping the one reserved for
//!    the reference sphere) and assign each data cell to the group with the
//!    nearest median hue.
//! 6. Pack the data-cell colors, two bits per cell, into 16-bit words.

mod board;
mod color;
mod error;
mod exemplar;
mod identifier;
mod params;
mod quad;
mod scan;

pub use board::{non_black_cell_corners, Board, Cell};
pub use color::{classify_hue, classify_hue_with, hue_distance, ColorClass, HueBand, HUE_BANDS};
pub use error::{BoardError, ClassifyError};
pub use exemplar::{
    circular_median, group_samples, Classification, ClassifierKind, ExemplarGroup, HueSample,
};
pub use identifier::{Identifier, CELLS_PER_WORD, WORD_BITS};
pub use params::BoardParams;
pub use quad::{Edge, Line, Quad, RowWalker, Vertex};
pub use scan::{scan_mean_hue, RunningMean};
