//! Error types for basis parsing and orthonormalization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GsoError {
    /// Malformed or non-numeric input text.
    #[error("could not parse input on line {line}: {message}")]
    InputParse { line: usize, message: String },

    /// A basis vector does not have the expected number of components.
    #[error("basis vector {index} has {found} components, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Normalization hit a (near) zero norm: the input is linearly dependent.
    #[error("basis is degenerate: vector {index} has residual norm {norm:e} after projection")]
    DegenerateBasis { index: usize, norm: f64 },

    /// A residual norm overflowed `f64` or a component was NaN.
    #[error("vector {index} has non-finite norm {norm} (components too large or not numbers)")]
    NonFiniteNorm { index: usize, norm: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GsoError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        GsoError::InputParse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GsoError>;
