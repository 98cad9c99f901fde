/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The edit buffer.
//!
//! A [`MagicString`] keeps the original text untouched and records edits on
//! a set of chunks that partition it. Chunks live in an arena; two
//! independent structures order them:
//!
//! - original order: `by_start`/`by_end` maps from original offsets to the
//!   chunk starting/ending there. Only splitting changes them.
//! - render order: `previous`/`next` links between chunks, starting at
//!   `first_chunk`. Only [`MagicString::move_to`] reorders it.
//!
//! Operations are split across submodules by concern: `edit` for mutation,
//! `query` for read-only views, `trim` and `indent` for whole-buffer
//! whitespace handling.

mod edit;
mod indent;
mod query;
mod trim;

use crate::chunk::{Chunk, ChunkId, Chunks};
use crate::error::{MagicStringError, Result};
use crate::options::MagicStringOptions;
use indexmap::IndexSet;
use quarto_source_map::Locator;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Text edit buffer over an immutable original string.
///
/// All positional arguments are byte offsets into the original text, no
/// matter how the buffer has been edited or reordered since.
///
/// # Example
///
/// ```rust
/// use quarto_magic_string::{MagicString, OverwriteOptions};
///
/// let mut s = MagicString::new("problems = 99");
/// s.overwrite(0, 8, "answer", OverwriteOptions::default())?
///     .overwrite(11, 13, "42", OverwriteOptions::default())?
///     .prepend("var ")
///     .append(";");
/// assert_eq!(s.to_string(), "var answer = 42;");
/// # Ok::<(), quarto_magic_string::MagicStringError>(())
/// ```
///
/// Cloning is cheap for the original text (shared) and deep for the edit
/// state, so clones evolve independently.
#[derive(Debug, Clone)]
pub struct MagicString {
    original: Arc<str>,
    locator: Locator,

    intro: String,
    outro: String,

    chunks: Vec<Chunk>,
    first_chunk: ChunkId,
    last_chunk: ChunkId,
    by_start: BTreeMap<usize, ChunkId>,
    by_end: BTreeMap<usize, ChunkId>,

    filename: Option<String>,
    indent_exclusion_ranges: Vec<(usize, usize)>,
    ignore_list: bool,

    sourcemap_locations: BTreeSet<usize>,
    stored_names: IndexSet<String>,
}

impl MagicString {
    pub fn new(original: impl Into<Arc<str>>) -> Self {
        Self::with_options(original, MagicStringOptions::default())
    }

    pub fn with_options(original: impl Into<Arc<str>>, options: MagicStringOptions) -> Self {
        let original: Arc<str> = original.into();
        let chunk = Chunk::new(0, original.len(), &original);

        MagicString {
            locator: Locator::new(Arc::clone(&original)),
            intro: String::new(),
            outro: String::new(),
            chunks: vec![chunk],
            first_chunk: 0,
            last_chunk: 0,
            by_start: BTreeMap::from([(0, 0)]),
            by_end: BTreeMap::from([(original.len(), 0)]),
            filename: options.filename,
            indent_exclusion_ranges: options.indent_exclusion_ranges,
            ignore_list: options.ignore_list,
            sourcemap_locations: BTreeSet::new(),
            stored_names: IndexSet::new(),
            original,
        }
    }

    /// The original text.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Line index over the original text.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn indent_exclusion_ranges(&self) -> &[(usize, usize)] {
        &self.indent_exclusion_ranges
    }

    pub fn ignore_list(&self) -> bool {
        self.ignore_list
    }

    /// Text prepended to the whole buffer.
    pub fn intro(&self) -> &str {
        &self.intro
    }

    /// Text appended to the whole buffer.
    pub fn outro(&self) -> &str {
        &self.outro
    }

    /// Original substrings recorded as names, in registration order.
    pub fn stored_names(&self) -> impl Iterator<Item = &str> {
        self.stored_names.iter().map(String::as_str)
    }

    pub(crate) fn name_index(&self, name: &str) -> Option<usize> {
        self.stored_names.get_index_of(name)
    }

    pub(crate) fn stored_name(&self, index: usize) -> Option<&str> {
        self.stored_names.get_index(index).map(String::as_str)
    }

    pub fn sourcemap_locations(&self) -> &BTreeSet<usize> {
        &self.sourcemap_locations
    }

    /// Force a mapping segment at `index` even when `hires` is off.
    pub fn add_sourcemap_location(&mut self, index: usize) -> Result<&mut Self> {
        self.check_index(index)?;
        self.sourcemap_locations.insert(index);
        Ok(self)
    }

    /// Chunks in render order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self, self.first_chunk)
    }

    pub(crate) fn chunk(&self, id: ChunkId) -> &Chunk {
        &self.chunks[id]
    }

    /// Every rendered piece of text, in render order.
    pub(crate) fn render_pieces(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.intro.as_str())
            .chain(
                self.chunks()
                    .flat_map(|chunk| [chunk.intro, chunk.content, chunk.outro]),
            )
            .chain(std::iter::once(self.outro.as_str()))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index > self.original.len() {
            return Err(MagicStringError::OutOfBounds {
                index,
                length: self.original.len(),
            });
        }
        if !self.original.is_char_boundary(index) {
            return Err(MagicStringError::NotCharBoundary { index });
        }
        Ok(())
    }

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<()> {
        self.check_index(start)?;
        self.check_index(end)?;
        if end < start {
            return Err(MagicStringError::InvalidRange { start, end });
        }
        Ok(())
    }

    /// The chunk with `start < index < end`, if `index` is not a boundary.
    pub(crate) fn chunk_containing(&self, index: usize) -> Option<ChunkId> {
        let (_, &id) = self.by_start.range(..index).next_back()?;
        self.chunks[id].contains(index).then_some(id)
    }

    /// The chunk covering `[index, index + 1)` in original order.
    pub(crate) fn chunk_at(&self, index: usize) -> Option<ChunkId> {
        let (_, &id) = self.by_start.range(..=index).next_back()?;
        (index < self.chunks[id].end).then_some(id)
    }

    /// Chunks overlapping `[start, end)`, in original order.
    pub(crate) fn chunks_in_range(&self, start: usize, end: usize) -> Vec<ChunkId> {
        let mut ids = Vec::new();
        let mut current = self.chunk_at(start);
        while let Some(id) = current {
            let chunk = &self.chunks[id];
            if chunk.start >= end {
                break;
            }
            ids.push(id);
            current = self.by_start.get(&chunk.end).copied();
        }
        ids
    }

    /// Fail if creating a boundary at `index` would lose edited content.
    pub(crate) fn check_splittable(&self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if let Some(id) = self.chunk_containing(index) {
            let chunk = &self.chunks[id];
            if chunk.edited && !chunk.content.is_empty() {
                let loc = self.locator.locate(index)?;
                return Err(MagicStringError::SplitEdited {
                    line: loc.line,
                    column: loc.column,
                    original: self.original[chunk.start..chunk.end].to_string(),
                });
            }
        }
        Ok(())
    }

    /// Make sure a chunk boundary exists at `index`.
    pub(crate) fn split(&mut self, index: usize) -> Result<()> {
        self.check_splittable(index)?;
        if let Some(id) = self.chunk_containing(index) {
            self.split_chunk(id, index);
        }
        Ok(())
    }

    /// Split chunk `id` at `index` without checking for edited content.
    ///
    /// The new chunk directly follows `id` in render order and is returned.
    pub(crate) fn split_chunk(&mut self, id: ChunkId, index: usize) -> ChunkId {
        let (start, end) = (self.chunks[id].start, self.chunks[id].end);
        tracing::trace!(start, end, index, "Splitting chunk");

        let original = Arc::clone(&self.original);
        let mut remainder = self.chunks[id].split_off(index, &original[start..end]);

        let new_id = self.chunks.len();
        remainder.previous = Some(id);
        remainder.next = self.chunks[id].next;
        if let Some(next) = remainder.next {
            self.chunks[next].previous = Some(new_id);
        }
        self.chunks[id].next = Some(new_id);
        self.chunks.push(remainder);

        self.by_end.insert(index, id);
        self.by_start.insert(index, new_id);
        self.by_end.insert(end, new_id);
        if self.last_chunk == id {
            self.last_chunk = new_id;
        }

        new_id
    }

    /// Remove chunk `id` from the render chain. The chain must keep at
    /// least one other chunk.
    pub(crate) fn unlink(&mut self, id: ChunkId) {
        let (previous, next) = (self.chunks[id].previous, self.chunks[id].next);
        match previous {
            Some(p) => self.chunks[p].next = next,
            None => {
                if let Some(n) = next {
                    self.first_chunk = n;
                }
            }
        }
        match next {
            Some(n) => self.chunks[n].previous = previous,
            None => {
                if let Some(p) = previous {
                    self.last_chunk = p;
                }
            }
        }
        self.chunks[id].previous = None;
        self.chunks[id].next = None;
    }

    /// Insert an unlinked chunk before `before` in render order, or at the
    /// end when `before` is `None`.
    pub(crate) fn link_before(&mut self, id: ChunkId, before: Option<ChunkId>) {
        let previous = match before {
            Some(b) => self.chunks[b].previous,
            None => Some(self.last_chunk),
        };

        self.chunks[id].previous = previous;
        self.chunks[id].next = before;
        match previous {
            Some(p) => self.chunks[p].next = Some(id),
            None => self.first_chunk = id,
        }
        match before {
            Some(b) => self.chunks[b].previous = Some(id),
            None => self.last_chunk = id,
        }
    }
}

impl From<&str> for MagicString {
    fn from(original: &str) -> Self {
        MagicString::new(original)
    }
}

impl From<String> for MagicString {
    fn from(original: String) -> Self {
        MagicString::new(original)
    }
}

impl fmt::Display for MagicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_pieces().try_for_each(|piece| f.write_str(piece))
    }
}
