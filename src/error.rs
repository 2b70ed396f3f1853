//! Error types for citation parsing.
//!
//! This module provides the [`RefError`] type for all library operations
//! and the [`Result`] convenience type.

use std::fmt;

use thiserror::Error;

/// The structural condition that aborted a RIS parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralErrorKind {
    /// A `TY` line appeared while a record was already open.
    NestedStart,
    /// An `ER` line appeared with no open record.
    UnmatchedEnd,
    /// The input ended while a record was still open.
    UnterminatedRecord,
}

impl fmt::Display for StructuralErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NestedStart => "record start inside an open record",
            Self::UnmatchedEnd => "record end without a matching start",
            Self::UnterminatedRecord => "input ended inside an open record",
        };
        f.write_str(text)
    }
}

/// Error type for all library operations.
#[derive(Error, Debug)]
pub enum RefError {
    /// The record delimiters of a RIS stream are malformed.
    ///
    /// `line` is the 1-based input line where the problem was detected; for
    /// [`StructuralErrorKind::UnterminatedRecord`] it is the line that opened
    /// the record that was never closed.
    #[error("Structural error at line {line}: {kind}")]
    Structural {
        /// What went wrong.
        kind: StructuralErrorKind,
        /// Line number of the offending delimiter.
        line: usize,
    },

    /// The requested format identifier is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error from the underlying line source.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RefError {
    /// The structural error kind, if this is a structural error.
    #[must_use]
    pub fn structural_kind(&self) -> Option<StructuralErrorKind> {
        match self {
            Self::Structural { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`RefError`].
pub type Result<T> = std::result::Result<T, RefError>;
