/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Chunked text editing with source maps
//!
//! This crate provides [`MagicString`], an edit buffer over an immutable
//! original text. Insertions, replacements, removals and moves are all
//! addressed by offsets into the original, so edits made in any order
//! compose without the caller tracking how earlier edits shifted things.
//! At any point the buffer can render its generated text and a source map
//! v3 artifact relating the two.
//!
//! # Overview
//!
//! - [`MagicString`]: The edit buffer
//! - [`OffsetMagicString`]: A borrowed view with shifted positions
//! - [`ChunkView`]: Read-only chunk state for callers composing buffers
//! - Option structs: [`MagicStringOptions`], [`OverwriteOptions`],
//!   [`IndentOptions`], [`SourceMapOptions`]
//!
//! # Example
//!
//! ```rust
//! use quarto_magic_string::{Hires, MagicString, OverwriteOptions, SourceMapOptions};
//!
//! let mut s = MagicString::new("abcdefghijkl");
//! s.overwrite(3, 6, "DEF", OverwriteOptions::default())?;
//! s.move_to(9, 12, 0)?;
//! assert_eq!(s.to_string(), "jklabcDEFghi");
//!
//! let map = s.generate_map(&SourceMapOptions {
//!     file: Some("out.txt".into()),
//!     source: Some("in.txt".into()),
//!     hires: Hires::Exact,
//!     ..Default::default()
//! })?;
//! assert_eq!(map.sources, vec!["in.txt"]);
//! # Ok::<(), quarto_magic_string::MagicStringError>(())
//! ```

mod chunk;
mod encoder;
pub mod error;
mod magic_string;
mod offset;
pub mod options;

pub use chunk::{ChunkView, Chunks};
pub use error::{MagicStringError, Result};
pub use magic_string::MagicString;
pub use offset::OffsetMagicString;
pub use options::{Hires, IndentOptions, MagicStringOptions, OverwriteOptions, SourceMapOptions};
