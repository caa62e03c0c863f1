//! Error type shared by the allocator, the drivers and the listing writer.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a benchmark run before it finishes.
///
/// None of these are retried. The binary reports them and exits non-zero;
/// library callers (tests, embedding harnesses) get them back as values.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A buffer could not be reserved
    #[error("Memory allocation failed: {what} ({elements} elements)")]
    Allocation {
        /// What was being allocated
        what: &'static str,
        /// Requested element count
        elements: usize,
        /// Underlying reservation failure
        #[source]
        source: TryReserveError,
    },

    /// The persisted result listing could not be opened for writing
    #[error("Error opening file {}: {source}", .path.display())]
    OutputUnavailable {
        /// Destination that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Operands of a multiplication do not share one square dimension
    #[error(
        "The number of columns in Matrix-1 ({a_cols}) must be equal to the number of rows in \
         Matrix-2 ({b_rows}), and the result must be {a_cols}x{a_cols} (got {c_dim}x{c_dim})"
    )]
    DimensionMismatch {
        /// Columns of A
        a_cols: usize,
        /// Rows of B
        b_rows: usize,
        /// Dimension of the accumulator
        c_dim: usize,
    },

    /// Matrix dimension is zero, overflows, or disagrees with the data length
    #[error("Invalid matrix dimension {n}: {reason}")]
    InvalidDimension {
        /// Requested dimension
        n: usize,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A block size of zero was requested
    #[error("Invalid block size {0}: must be at least 1")]
    InvalidBlockSize(usize),

    /// The sweep was given nothing to sweep
    #[error("Block size list is empty")]
    EmptyBlockSizes,

    /// Writing a listing line failed after the destination was opened
    #[error("I/O error while writing results: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BenchError>;
