use crate::leaf_stack::FlipDirection;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("invalid SVG path data: {0}")]
    InvalidPathData(String),
    /// Only a single move-to followed by one drawing segment is accepted.
    #[error("path must contain exactly one segment, found {segments}")]
    UnsupportedPath { segments: usize },
    #[error("control points must be finite")]
    NonFiniteControlPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("milestone index {index} is out of range for {count} milestones")]
    IndexOutOfRange { index: i64, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LeafError {
    #[error("no leaf left to turn {direction:?}")]
    NoLeafToTurn { direction: FlipDirection },
    #[error("leaf {leaf} does not exist ({count} leaves)")]
    UnknownLeaf { leaf: usize, count: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Leaf(#[from] LeafError),
    #[error(transparent)]
    Data(#[from] journey_data::DataError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
