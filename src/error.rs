//! Error types for kmmatching

use thiserror::Error;

/// Result type alias using kmmatching's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a weight matrix.
///
/// All of these are detected before the matcher runs, so a failing input
/// never produces a partial matching.
#[derive(Error, Debug)]
pub enum Error {
    /// The declared size was negative
    #[error("matrix size must be non-negative, got {0}")]
    NegativeSize(i64),

    /// Number of rows differs from the declared size
    #[error("expected {expected} rows, got {got}")]
    RowCount {
        /// Declared size
        expected: usize,
        /// Rows supplied
        got: usize,
    },

    /// A row is not exactly `size` weights long
    #[error("row {row} has {got} weights, expected {expected}")]
    RowLength {
        /// Zero-based row index
        row: usize,
        /// Declared size
        expected: usize,
        /// Weights supplied in that row
        got: usize,
    },

    /// Text input did not start with a size
    #[error("missing matrix size")]
    MissingSize,

    /// Text input ended before the matrix was complete
    #[error("missing weight at row {row}, column {col}")]
    MissingWeight {
        /// Zero-based row index
        row: usize,
        /// Zero-based column index
        col: usize,
    },

    /// A token could not be read as an integer
    #[error("invalid integer '{token}'")]
    InvalidToken {
        /// The offending token
        token: String,
    },

    /// Reading the input failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for every error caused by a malformed matrix rather than IO.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
