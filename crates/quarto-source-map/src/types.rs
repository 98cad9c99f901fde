//! Core types for source mapping

use serde::{Deserialize, Serialize};

/// A location in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in UTF-16 code units)
    pub column: usize,
}

/// One mapping entry: a generated column, optionally tied to an original position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Column in the generated line (UTF-16 code units)
    pub generated_column: u32,
    /// Original position, or `None` for generated text with no source
    pub source: Option<SegmentSource>,
}

/// Original-side half of a [`Segment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSource {
    pub source_index: u32,
    pub line: u32,
    pub column: u32,
    pub name_index: Option<u32>,
}

impl Segment {
    /// A segment that marks generated text without an original position
    pub fn unmapped(generated_column: u32) -> Self {
        Segment {
            generated_column,
            source: None,
        }
    }

    /// A segment pointing at `line:column` of source `source_index`
    pub fn mapped(
        generated_column: u32,
        source_index: u32,
        line: u32,
        column: u32,
        name_index: Option<u32>,
    ) -> Self {
        Segment {
            generated_column,
            source: Some(SegmentSource {
                source_index,
                line,
                column,
                name_index,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_segment_constructors() {
        let seg = Segment::unmapped(4);
        assert_eq!(seg.generated_column, 4);
        assert!(seg.source.is_none());

        let seg = Segment::mapped(2, 0, 1, 3, Some(7));
        let source = seg.source.unwrap();
        assert_eq!(source.line, 1);
        assert_eq!(source.column, 3);
        assert_eq!(source.name_index, Some(7));
    }

    #[test]
    fn test_serialize_mapped_segment() {
        let seg = Segment::mapped(2, 0, 1, 3, Some(7));
        let value = serde_json::to_value(seg).unwrap();
        assert_eq!(
            value,
            json!({
                "generated_column": 2,
                "source": { "source_index": 0, "line": 1, "column": 3, "name_index": 7 }
            })
        );
        assert_eq!(serde_json::from_value::<Segment>(value).unwrap(), seg);
    }

    #[test]
    fn test_serialize_unmapped_segment() {
        let value = serde_json::to_value(Segment::unmapped(4)).unwrap();
        assert_eq!(value, json!({ "generated_column": 4, "source": null }));

        let source: SegmentSource = serde_json::from_value(json!({
            "source_index": 1,
            "line": 0,
            "column": 9,
            "name_index": null
        }))
        .unwrap();
        assert_eq!(source.name_index, None);
        assert_eq!((source.source_index, source.column), (1, 9));
    }
}
