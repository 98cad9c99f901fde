/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for edit buffer operations.

use quarto_source_map::SourceMapError;
use thiserror::Error;

/// Errors that can occur while editing or querying a [`MagicString`](crate::MagicString).
///
/// Every operation validates its arguments before touching the buffer, so
/// an error always leaves the buffer as it was.
#[derive(Debug, Error)]
pub enum MagicStringError {
    /// Offset outside `[0, length]` of the original text.
    #[error("Character {index} is out of bounds (original length is {length})")]
    OutOfBounds { index: usize, length: usize },

    /// Offset inside a multi-byte character of the original text.
    #[error("Character {index} is not on a UTF-8 character boundary")]
    NotCharBoundary { index: usize },

    /// Range whose end lies before its start.
    #[error("Invalid range {start}..{end}: end must not be less than start")]
    InvalidRange { start: usize, end: usize },

    /// Position inside an already replaced span used as an anchor.
    #[error("Cannot use replaced character {index} as {role} anchor")]
    InvalidAnchor { index: usize, role: &'static str },

    /// Overwrite of a span that was already replaced with content.
    #[error("Cannot overwrite the same content twice: {start}..{end} overlaps the edited \"{original}\"")]
    DoubleEdit {
        start: usize,
        end: usize,
        original: String,
    },

    /// A boundary was needed inside an edited chunk.
    #[error("Cannot split a chunk that has already been edited ({line}:{column} - \"{original}\")")]
    SplitEdited {
        line: usize,
        column: usize,
        original: String,
    },

    #[error("Cannot overwrite a zero-length range - use append_left or prepend_right instead")]
    ZeroLengthOverwrite,

    #[error("Cannot overwrite across a split point")]
    DiscontiguousOverwrite,

    #[error("Cannot move a selection inside itself")]
    IllegalMove,

    /// Trim pattern that is not a valid regular expression.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    SourceMap(#[from] SourceMapError),
}

/// Result type for edit buffer operations.
pub type Result<T> = std::result::Result<T, MagicStringError>;
