//! Source maps for Quarto
//!
//! This crate provides the position bookkeeping shared by tools that
//! rewrite text and need to point back at the original: a line index for
//! offset to line/column lookups, the base64 VLQ segment codec, and the
//! source map v3 artifact with its JSON and `data:` URL forms.
//!
//! # Overview
//!
//! The core types are:
//! - [`Locator`]: Maps byte offsets of a fixed text to [`Location`]s
//! - [`Segment`]: One generated-to-original mapping entry
//! - [`SourceMap`]: The encoded artifact, serializable to JSON
//! - [`DecodedSourceMap`]: The same artifact with decoded segments
//!
//! # Example
//!
//! ```rust
//! use quarto_source_map::*;
//!
//! let locator = Locator::new("# Hello\nWorld");
//! let loc = locator.locate(9).unwrap();
//! assert_eq!((loc.line, loc.column), (1, 1));
//!
//! let map = DecodedSourceMap {
//!     file: None,
//!     sources: vec!["main.qmd".into()],
//!     sources_content: None,
//!     names: vec![],
//!     mappings: vec![vec![Segment::mapped(0, 0, 0, 0, None)]],
//!     x_google_ignore_list: None,
//! }
//! .encode();
//! assert_eq!(map.mappings, "AAAA");
//! ```

pub mod error;
pub mod locator;
pub mod mapping;
pub mod source_map;
pub mod types;
pub mod utils;
pub mod vlq;

// Re-export main types
pub use error::{SourceMapError, SourceMapResult};
pub use locator::Locator;
pub use mapping::{decode_mappings, encode_mappings};
pub use source_map::{DecodedSourceMap, OriginalPosition, SourceMap};
pub use types::{Location, Segment, SegmentSource};
pub use utils::{basename, relative_path};
