use ilac_core::DetectionError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error("no candidate ordering of the reference points forms a convex quadrilateral")]
    NoConvexOrdering,
}
