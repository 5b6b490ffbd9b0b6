//! Errors raised while parsing text graphs.

use thiserror::Error;

/// Errors produced by [`EdgeListGraph`](crate::EdgeListGraph).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// Reading the input failed.
    #[error("failed to read edge list: {source}")]
    Io {
        /// Underlying I/O failure.
        #[from]
        source: std::io::Error,
    },
    /// A line did not match `from to [weight]` or `nodes N`.
    #[error("line {line}: {reason}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// A weight was negative or not finite.
    #[error("line {line}: weight {weight} must be finite and non-negative")]
    InvalidWeight {
        /// One-based line number.
        line: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// An endpoint exceeded the declared node count.
    #[error("line {line}: node {node} is out of range for {node_count} declared nodes")]
    EndpointOutOfRange {
        /// One-based line number.
        line: usize,
        /// The offending node id.
        node: usize,
        /// Node count from the `nodes` directive.
        node_count: usize,
    },
    /// The input held no edges and no `nodes` directive.
    #[error("edge list is empty")]
    EmptyInput,
}

/// Errors produced by [`GridGraph`](crate::GridGraph).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Reading the input failed.
    #[error("failed to read grid: {source}")]
    Io {
        /// Underlying I/O failure.
        #[from]
        source: std::io::Error,
    },
    /// A row's width differed from the first row's.
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        /// One-based row number.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell was neither `.` nor `#`.
    #[error("row {row}, column {column}: unknown cell {cell:?}; expected '.' or '#'")]
    UnknownCell {
        /// One-based row number.
        row: usize,
        /// One-based column number.
        column: usize,
        /// The offending character.
        cell: char,
    },
    /// The input held no rows.
    #[error("grid is empty")]
    EmptyInput,
}
