//! End-to-end labeling: corners -> board -> identifier, optionally followed by
//! the reference-point ordering.

use serde::{Deserialize, Serialize};

use crate::chessboard::{Board, BoardError, BoardParams, ClassifyError, Identifier};
use crate::core::{BoardSize, DetectionError, GridCornerSource, HueImageView, MarkerCenterSource};
use crate::marker::{locate_reference, ReferenceError, ReferenceQuad};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by [`BoardLabeler`].
#[derive(thiserror::Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("invalid labeler config: {0}")]
    Config(#[from] serde_json::Error),
}

impl LabelError {
    /// `true` when another capture of the same board may succeed; `false`
    /// for configuration problems that will fail every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            LabelError::Board(e) => board_retryable(e),
            LabelError::Classify(e) => classify_retryable(e),
            LabelError::Reference(ReferenceError::Detection(e)) => detection_retryable(e),
            LabelError::Reference(ReferenceError::NoConvexOrdering) => true,
            LabelError::Config(_) => false,
        }
    }
}

fn detection_retryable(e: &DetectionError) -> bool {
    matches!(
        e,
        DetectionError::NoBoardFound | DetectionError::InsufficientMarkers { .. }
    )
}

fn classify_retryable(e: &ClassifyError) -> bool {
    matches!(
        e,
        ClassifyError::HueOutOfRange { .. } | ClassifyError::MissingRed { .. }
    )
}

fn board_retryable(e: &BoardError) -> bool {
    match e {
        BoardError::Detection(d) => detection_retryable(d),
        BoardError::Geometry { .. } => true,
        BoardError::Classify(c) => classify_retryable(c),
        BoardError::InvalidMarkerSample { .. } | BoardError::NotEnoughCells { .. } => false,
    }
}

fn default_marker_search_scale() -> f32 {
    3.0
}

/// Labeler configuration, typically loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelerParams {
    /// Board dimensions in inner corners.
    pub board_size: BoardSize,
    #[serde(default)]
    pub board: BoardParams,
    /// Expansion of the corner bounding box searched for markers.
    #[serde(default = "default_marker_search_scale")]
    pub marker_search_scale: f32,
}

impl LabelerParams {
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            board: BoardParams::default(),
            marker_search_scale: default_marker_search_scale(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LabelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Successful labeling of one image.
#[derive(Clone, Debug)]
pub struct LabeledBoard {
    pub board: Board,
    pub identifier: Identifier,
    /// Present only when markers were requested.
    pub reference: Option<ReferenceQuad>,
}

/// Runs the labeling pipeline against pluggable corner and marker detectors.
#[derive(Clone, Debug)]
pub struct BoardLabeler {
    params: LabelerParams,
}

impl BoardLabeler {
    pub fn new(params: LabelerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LabelerParams {
        &self.params
    }

    /// Detect corners, classify the cells and encode the identifier.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(width = image.width(), height = image.height()))
    )]
    pub fn label(
        &self,
        image: &HueImageView<'_>,
        corners: &dyn GridCornerSource,
    ) -> Result<LabeledBoard, LabelError> {
        let size = self.params.board_size.validated().map_err(BoardError::from)?;
        let points = corners
            .detect_grid_corners(size)
            .map_err(BoardError::from)?;
        let board = Board::new(size, points, image, &self.params.board)?;
        let identifier = board.identifier()?;
        log::info!("labeled board {}x{}: id {identifier}", size.width, size.height);
        Ok(LabeledBoard {
            board,
            identifier,
            reference: None,
        })
    }

    /// Same as [`Self::label`], then order the board center and the markers
    /// found around the board.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(width = image.width(), height = image.height()))
    )]
    pub fn label_with_reference(
        &self,
        image: &HueImageView<'_>,
        corners: &dyn GridCornerSource,
        markers: &dyn MarkerCenterSource,
    ) -> Result<LabeledBoard, LabelError> {
        let mut labeled = self.label(image, corners)?;
        let region = labeled.board.marker_search_rect(
            self.params.marker_search_scale,
            image.width(),
            image.height(),
        );
        labeled.reference = Some(locate_reference(markers, labeled.board.center(), region)?);
        Ok(labeled)
    }
}
