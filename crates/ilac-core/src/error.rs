use crate::PixelRect;

/// Degenerate or misused cell geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("column requested from a horizontal edge")]
    HorizontalEdge,
    #[error("row requested from a vertical edge")]
    VerticalEdge,
    #[error("vertex ({x}, {y}) is not a finite, non-negative image coordinate")]
    InvalidVertex { x: f32, y: f32 },
    #[error("quadrilateral is degenerate (coincident or collinear vertices)")]
    Degenerate,
    #[error("cell scan enclosed no pixels")]
    EmptyCell,
    #[error("rect {rect:?} lies outside the {width}x{height} image")]
    OutsideImage {
        rect: PixelRect,
        width: usize,
        height: usize,
    },
}

/// Upstream detection failures and board-configuration problems.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("no chessboard found")]
    NoBoardFound,
    #[error("need 3 marker centers, found {found}")]
    InsufficientMarkers { found: usize },
    #[error("board {width}x{height} is symmetric (width and height parities must differ)")]
    SymmetricBoard { width: u32, height: u32 },
    #[error("expected {expected} grid corners, got {got}")]
    CornerCountMismatch { expected: usize, got: usize },
    #[error("board {width}x{height} has no cells (need >= 2 corners per side)")]
    BoardTooSmall { width: u32, height: u32 },
}

/// Accessor indexed past the end of its collection.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{what} index {index} out of bounds (len {len})")]
pub struct BoundsError {
    pub what: &'static str,
    pub index: usize,
    pub len: usize,
}

impl BoundsError {
    /// Return `items[index]` or a bounds error naming `what`.
    pub fn check<'a, T>(what: &'static str, items: &'a [T], index: usize) -> Result<&'a T, Self> {
        items.get(index).ok_or(BoundsError {
            what,
            index,
            len: items.len(),
        })
    }
}
