//! Source map v3 artifact

use crate::error::SourceMapResult;
use crate::mapping::{decode_mappings, encode_mappings};
use crate::types::Segment;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An encoded source map, serializable to the standard JSON form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    #[serde(
        rename = "sourcesContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sources_content: Option<Vec<Option<String>>>,
    pub names: Vec<String>,
    pub mappings: String,
    /// Indices into `sources` that are not author code
    #[serde(
        rename = "x_google_ignoreList",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub x_google_ignore_list: Option<Vec<u32>>,
}

/// A source map whose mappings are still lines of [`Segment`]s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedSourceMap {
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub sources_content: Option<Vec<Option<String>>>,
    pub names: Vec<String>,
    pub mappings: Vec<Vec<Segment>>,
    pub x_google_ignore_list: Option<Vec<u32>>,
}

/// Result of looking up a generated position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    pub source: String,
    /// Line in the original source (0-indexed)
    pub line: u32,
    /// Column in the original source (0-indexed)
    pub column: u32,
    pub name: Option<String>,
}

impl SourceMap {
    /// Serialize to the canonical JSON string
    pub fn to_json(&self) -> SourceMapResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON source map
    pub fn from_json(json: &str) -> SourceMapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a `data:` URL suitable for a `sourceMappingURL` comment
    pub fn to_url(&self) -> SourceMapResult<String> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(json)
        ))
    }

    /// Decode the `mappings` string
    pub fn decode(&self) -> SourceMapResult<DecodedSourceMap> {
        Ok(DecodedSourceMap {
            file: self.file.clone(),
            sources: self.sources.clone(),
            sources_content: self.sources_content.clone(),
            names: self.names.clone(),
            mappings: decode_mappings(&self.mappings)?,
            x_google_ignore_list: self.x_google_ignore_list.clone(),
        })
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl DecodedSourceMap {
    /// Delta-encode the segments into a [`SourceMap`]
    pub fn encode(&self) -> SourceMap {
        SourceMap {
            version: 3,
            file: self.file.clone(),
            sources: self.sources.clone(),
            sources_content: self.sources_content.clone(),
            names: self.names.clone(),
            mappings: encode_mappings(&self.mappings),
            x_google_ignore_list: self.x_google_ignore_list.clone(),
        }
    }

    /// Find the original position for a generated `line`/`column` (0-indexed)
    ///
    /// Uses the closest segment at or before `column` on the same line.
    /// Returns `None` when no such segment exists or it is unmapped.
    pub fn original_position_for(&self, line: usize, column: u32) -> Option<OriginalPosition> {
        let segments = self.mappings.get(line)?;
        let index = segments.partition_point(|s| s.generated_column <= column);
        let source = segments.get(index.checked_sub(1)?)?.source?;

        Some(OriginalPosition {
            source: self.sources.get(source.source_index as usize)?.clone(),
            line: source.line,
            column: source.column,
            name: source
                .name_index
                .and_then(|i| self.names.get(i as usize).cloned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DecodedSourceMap {
        DecodedSourceMap {
            file: Some("out.js".to_string()),
            sources: vec!["in.js".to_string()],
            sources_content: None,
            names: vec!["Foo".to_string()],
            mappings: vec![vec![
                Segment::mapped(0, 0, 0, 0, None),
                Segment::mapped(9, 0, 0, 9, Some(0)),
                Segment::mapped(12, 0, 0, 12, None),
            ]],
            x_google_ignore_list: None,
        }
    }

    #[test]
    fn test_json_field_names() {
        let mut map = sample().encode();
        map.sources_content = Some(vec![Some("x".to_string())]);
        map.x_google_ignore_list = Some(vec![0]);

        let value: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], 3);
        assert_eq!(value["file"], "out.js");
        assert_eq!(value["sourcesContent"][0], "x");
        assert_eq!(value["x_google_ignoreList"][0], 0);
        assert_eq!(value["mappings"], "AAAA,SAASA,GAAG");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut map = sample().encode();
        map.file = None;
        let json = map.to_json().unwrap();
        assert!(!json.contains("\"file\""));
        assert!(!json.contains("sourcesContent"));
        assert!(!json.contains("x_google_ignoreList"));
    }

    #[test]
    fn test_to_url() {
        let map = sample().encode();
        let url = map.to_url().unwrap();
        let payload = url
            .strip_prefix("data:application/json;charset=utf-8;base64,")
            .unwrap();
        let json = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), map.to_string());
    }

    #[test]
    fn test_decode_round_trip_through_json() {
        let map = sample().encode();
        let parsed = SourceMap::from_json(&map.to_json().unwrap()).unwrap();
        assert_eq!(parsed.decode().unwrap(), sample());
    }

    #[test]
    fn test_original_position_for() {
        let decoded = sample();

        let pos = decoded.original_position_for(0, 10).unwrap();
        assert_eq!(pos.column, 9);
        assert_eq!(pos.name.as_deref(), Some("Foo"));

        let pos = decoded.original_position_for(0, 3).unwrap();
        assert_eq!(pos.column, 0);
        assert_eq!(pos.name, None);

        assert!(decoded.original_position_for(1, 0).is_none());
    }
}
