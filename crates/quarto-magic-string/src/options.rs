/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Option structs for construction, editing and map generation.
//!
//! All options deserialize with defaults for missing fields, so callers can
//! build them in code or load them from configuration:
//!
//! ```rust
//! use quarto_magic_string::{Hires, SourceMapOptions};
//!
//! let options: SourceMapOptions =
//!     serde_json::from_str(r#"{ "file": "out.js", "hires": "boundary" }"#).unwrap();
//! assert_eq!(options.hires, Hires::Boundary);
//! assert!(!options.include_content);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Options for [`MagicString::with_options`](crate::MagicString::with_options).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MagicStringOptions {
    /// Name of the original file, for callers that compose several buffers.
    pub filename: Option<String>,

    /// Original ranges that `indent` leaves alone unless told otherwise.
    pub indent_exclusion_ranges: Vec<(usize, usize)>,

    /// Mark the source as not author code (`x_google_ignoreList`).
    pub ignore_list: bool,
}

/// Options for [`MagicString::overwrite`](crate::MagicString::overwrite).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverwriteOptions {
    /// Record the replaced original text in the map's `names`.
    pub store_name: bool,

    /// Keep text inserted inside the replaced range around the new content.
    pub content_only: bool,
}

/// Options for [`MagicString::indent`](crate::MagicString::indent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndentOptions {
    /// Original ranges not to indent. `None` uses the buffer's
    /// construction-time exclusion ranges.
    pub exclude: Option<Vec<(usize, usize)>>,

    /// Indent the very first line (default `true`).
    pub indent_start: bool,
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self {
            exclude: None,
            indent_start: true,
        }
    }
}

/// Segment density for unedited content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hires {
    /// One segment per chunk start, line start and registered location.
    #[default]
    Off,
    /// One segment per character.
    Exact,
    /// One segment per run of word characters and per other character.
    Boundary,
}

impl Serialize for Hires {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Hires::Off => serializer.serialize_bool(false),
            Hires::Exact => serializer.serialize_bool(true),
            Hires::Boundary => serializer.serialize_str("boundary"),
        }
    }
}

impl<'de> Deserialize<'de> for Hires {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Mode(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Hires::Off),
            Raw::Flag(true) => Ok(Hires::Exact),
            Raw::Mode(mode) if mode == "boundary" => Ok(Hires::Boundary),
            Raw::Mode(mode) => Err(serde::de::Error::custom(format!(
                "unknown hires mode '{}'",
                mode
            ))),
        }
    }
}

/// Options for [`MagicString::generate_map`](crate::MagicString::generate_map).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceMapOptions {
    /// Generated file path; only its basename is written to the map.
    pub file: Option<String>,

    /// Original file path, written relative to `file`'s directory.
    pub source: Option<String>,

    /// Embed the original text as `sourcesContent`.
    pub include_content: bool,

    pub hires: Hires,
}
