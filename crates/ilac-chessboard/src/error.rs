use ilac_core::{DetectionError, GeometryError};

use crate::color::ColorClass;
use crate::exemplar::ClassifierKind;

/// Color classification and encoding failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("classifier {0:?} is not implemented")]
    NotImplemented(ClassifierKind),
    #[error("no sample cells to classify against")]
    NoExemplars,
    #[error("hue {hue} is outside [0, 360)")]
    HueOutOfRange { hue: f32 },
    #[error("data cell {index} has class {class:?} without the red indicator")]
    MissingRed { index: usize, class: ColorClass },
}

/// Errors returned while building a [`crate::Board`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error("cell {cell}: {source}")]
    Geometry {
        cell: usize,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("marker sample {index} is not among the {samples} sample cells")]
    InvalidMarkerSample { index: usize, samples: usize },
    #[error("board has {cells} cells, fewer than the {samples} sample cells")]
    NotEnoughCells { cells: usize, samples: usize },
}
