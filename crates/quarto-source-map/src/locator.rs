//! Offset to line/column lookups over an immutable text

use crate::error::{SourceMapError, SourceMapResult};
use crate::types::Location;
use std::sync::Arc;

/// Line index over a fixed text
///
/// Scans the text once to record where each line starts. Lookups are
/// O(log n) in the number of lines, plus the length of the line prefix
/// when the text is not pure ASCII (columns are counted in UTF-16 units).
#[derive(Debug, Clone)]
pub struct Locator {
    source: Arc<str>,

    /// Byte offset of the first character of each line
    line_starts: Vec<usize>,

    ascii: bool,
}

impl Locator {
    /// Create a locator by analyzing `source`
    ///
    /// # Example
    ///
    /// ```
    /// use quarto_source_map::Locator;
    ///
    /// let locator = Locator::new("hello\nworld");
    /// let loc = locator.locate(6).unwrap();
    /// assert_eq!(loc.line, 1);
    /// assert_eq!(loc.column, 0);
    /// ```
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let source: Arc<str> = source.into();
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter_map(|(idx, b)| (b == b'\n').then_some(idx + 1)),
            )
            .collect();
        let ascii = source.is_ascii();

        Locator {
            source,
            line_starts,
            ascii,
        }
    }

    /// Convert a byte offset to a [`Location`]
    ///
    /// A newline belongs to the line it terminates. Fails for offsets
    /// greater than the text length or inside a multi-byte character.
    pub fn locate(&self, offset: usize) -> SourceMapResult<Location> {
        if offset > self.source.len() {
            return Err(SourceMapError::OutOfBounds {
                offset,
                length: self.source.len(),
            });
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];

        let column = if self.ascii {
            offset - line_start
        } else {
            self.source
                .get(line_start..offset)
                .ok_or(SourceMapError::NotCharBoundary { offset })?
                .encode_utf16()
                .count()
        };

        Ok(Location {
            offset,
            line,
            column,
        })
    }

    /// The text this locator indexes
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offsets at which each line starts
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Get the number of lines
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
