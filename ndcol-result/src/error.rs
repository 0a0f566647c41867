use std::fmt;
use thiserror::Error;

/// Unified error type for all ndcol operations.
///
/// Each variant carries enough context to tell which column, row, or
/// operation was involved. Errors surface synchronously to the immediate
/// caller; nothing in ndcol retries or partially applies a transfer.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or API parameter.
    ///
    /// Raised for rank mismatches between a slicer and its column, buffers
    /// whose length does not match the addressed selection, per-row shape
    /// assignment on a fixed-shape column, and empty row selectors.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// A named engine variable or column does not exist.
    #[error("Storage key not found")]
    NotFound,

    /// A variable-shaped cell was accessed before a shape was assigned to its
    /// row.
    ///
    /// Reads never fabricate an empty default for such cells; the caller has
    /// to assign a shape with `set_row_shape` first.
    #[error("shape not defined for column '{column}' row {row}")]
    ShapeUndefined { column: String, row: u64 },

    /// A row selector described more than one contiguous row range.
    ///
    /// The engine addresses one hyperrectangle per call, so disjoint row sets
    /// are rejected up front instead of being split into several transfers.
    #[error("{operation} supports single slices only")]
    UnsupportedMultiSlice { operation: String },

    /// The operation exists in the API but is not supported for this column
    /// kind (sliced access to text cells).
    #[error("{operation} is not implemented")]
    NotImplemented { operation: String },

    /// The array engine reported a failure while transferring data.
    ///
    /// `row` is the first row of the transfer.
    #[error("engine I/O failed for column '{column}' row {row}: {source}")]
    EngineIo {
        column: String,
        row: u64,
        #[source]
        source: Box<Error>,
    },

    /// A typed accessor was used against a column of another element type.
    #[error("type mismatch: column holds {expected}, accessor requested {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an engine failure with the column and row it was addressing.
    ///
    /// Already-wrapped errors are passed through unchanged so context is not
    /// nested twice.
    pub fn engine_io(column: impl Into<String>, row: u64, source: Error) -> Self {
        match source {
            wrapped @ Error::EngineIo { .. } => wrapped,
            other => Error::EngineIo {
                column: column.into(),
                row,
                source: Box::new(other),
            },
        }
    }

    #[inline]
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Error::NotImplemented {
            operation: operation.into(),
        }
    }

    #[inline]
    pub fn unsupported_multi_slice(operation: impl Into<String>) -> Self {
        Error::UnsupportedMultiSlice {
            operation: operation.into(),
        }
    }

    #[inline]
    pub fn shape_undefined(column: impl Into<String>, row: u64) -> Self {
        Error::ShapeUndefined {
            column: column.into(),
            row,
        }
    }

    /// Create a type mismatch error from any two displayable type tags.
    #[inline]
    pub fn type_mismatch<A: fmt::Display, B: fmt::Display>(expected: A, actual: B) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
