//! Error types for CRS matrix operations
//!
//! Every fallible operation in this crate reports failure synchronously to its
//! caller through [`CrsError`]. Nothing is retried internally.
//!
//! # Taxonomy
//!
//! - **Out-of-range**: a row index past the last row on insertion or row query
//! - **Invalid shape**: mismatched row/column counts among operands
//! - **Already-finalized**: `compress` on a matrix that is already compressed
//! - **Insufficient buffer**: row query into buffers smaller than the row
//!
//! # Examples
//!
//! ```
//! use crs_matrix::{CrsError, CrsMatrix};
//!
//! let mut m = CrsMatrix::<f64>::new(2, 2);
//! let err = m.insert_at_row(5, &[0], &[1.0]).unwrap_err();
//! assert!(matches!(err, CrsError::RowOutOfRange { row: 5, nrows: 2 }));
//! ```

use thiserror::Error;

/// Top-level error type for all CRS matrix operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrsError {
    #[error("Requested row is out of range: row {row} >= {nrows} rows")]
    RowOutOfRange { row: usize, nrows: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(#[from] ShapeMismatchError),

    #[error("Matrix is already compressed")]
    AlreadyCompressed,

    #[error("Buffer too small: row has {required} entries, buffer holds {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("Length mismatch: {cols} column indices but {values} values")]
    LengthMismatch { cols: usize, values: usize },

    #[error("Column index out of bounds in row {row}: {col} >= {ncols}")]
    ColIndexOutOfBounds { row: usize, col: usize, ncols: usize },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Splice error: {0}")]
    Splice(#[from] SpliceError),

    #[error("Operation {operation} is not supported on the {target} target")]
    UnsupportedTarget {
        target: String,
        operation: &'static str,
    },
}

/// Operand shape errors for binary operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatchError {
    #[error("The input and/or output matrices do not have a matching number of rows: A has {a}, B has {b}, C has {c}")]
    Rows { a: usize, b: usize, c: usize },

    #[error("The input matrices do not have a matching number of cols: A has {a}, B has {b}")]
    Cols { a: usize, b: usize },
}

/// Precondition failures of the splice primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Source sequences differ in length: {first} vs {second}")]
    SourceLength { first: usize, second: usize },

    #[error("Inserted sequences differ in length: {first} vs {second}")]
    InsertLength { first: usize, second: usize },

    #[error("Insertion offset {offset} exceeds source length {len}")]
    Offset { offset: usize, len: usize },
}

/// Result type alias for CRS matrix operations
pub type CrsResult<T> = Result<T, CrsError>;

impl CrsError {
    /// Create an invalid structure error with a message
    pub fn invalid_structure(msg: impl Into<String>) -> Self {
        CrsError::InvalidStructure(msg.into())
    }

    /// Check row and column agreement of `a`, `b` and the output `c`
    ///
    /// Rows must match across all three; columns only between the inputs.
    pub(crate) fn check_binary_shapes(
        a: (usize, usize),
        b: (usize, usize),
        c: (usize, usize),
    ) -> CrsResult<()> {
        if a.0 != b.0 || a.0 != c.0 {
            return Err(ShapeMismatchError::Rows {
                a: a.0,
                b: b.0,
                c: c.0,
            }
            .into());
        }
        if a.1 != b.1 {
            return Err(ShapeMismatchError::Cols { a: a.1, b: b.1 }.into());
        }
        Ok(())
    }
}
