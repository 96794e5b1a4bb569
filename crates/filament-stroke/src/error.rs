//! Error types for stroke construction.

use std::fmt;

/// Errors that abort polyline construction.
///
/// Degenerate geometry (tiny segments, collinear or reversing corners) is
/// never an error; it is repaired locally by the tessellator.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeError {
    /// A join style identifier that has no tessellation strategy.
    UnsupportedJoin(String),

    /// A cap style identifier that has no tessellation strategy.
    UnsupportedCap(String),

    /// A gradient was built without any keys.
    EmptyGradient,

    /// A gradient key has a non-finite parameter or value.
    NonFiniteGradientKey {
        /// Position of the offending key as supplied by the caller.
        index: usize,
    },

    /// A path point has a non-finite coordinate.
    NonFinitePoint {
        /// Index of the offending point in the path.
        index: usize,
    },
}

impl fmt::Display for StrokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeError::UnsupportedJoin(value) => {
                write!(f, "Unsupported join style: {}", value)
            }
            StrokeError::UnsupportedCap(value) => write!(f, "Unsupported cap style: {}", value),
            StrokeError::EmptyGradient => write!(f, "Gradient has no keys"),
            StrokeError::NonFiniteGradientKey { index } => {
                write!(f, "Gradient key {} is not finite", index)
            }
            StrokeError::NonFinitePoint { index } => {
                write!(f, "Path point {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for StrokeError {}

/// Result type for stroke operations.
pub type StrokeResult<T> = Result<T, StrokeError>;
