use serde::{Deserialize, Serialize};

use crate::exemplar::ClassifierKind;

/// Layout and classification settings for a color-coded board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    /// Leading non-black cells that carry known colors.
    pub sample_cells: usize,
    /// Sample cell reserved for locating the reference sphere. It is not
    /// used as a color exemplar.
    pub marker_sample: Option<usize>,
    pub classifier: ClassifierKind,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            sample_cells: 6,
            marker_sample: Some(0),
            classifier: ClassifierKind::Median,
        }
    }
}
