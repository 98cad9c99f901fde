//! Error types for source map construction and decoding

use thiserror::Error;

/// Errors that can occur while locating positions or handling mappings
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// Offset outside `[0, length]` of the located text
    #[error("Offset {offset} is out of bounds (text length is {length})")]
    OutOfBounds { offset: usize, length: usize },

    /// Offset that splits a multi-byte character
    #[error("Offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    /// Malformed VLQ mapping string
    #[error("Invalid mappings at position {position}: {message}")]
    InvalidMappings { position: usize, message: String },

    /// JSON (de)serialization of a source map failed
    #[error("Source map JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for source map operations.
pub type SourceMapResult<T> = Result<T, SourceMapError>;
